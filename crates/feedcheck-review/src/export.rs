//! CSV export of review records

use feedcheck_core::{FeedbackRecord, Result};
use std::io::Write;

/// Download name offered by the dashboard
pub const EXPORT_FILE_NAME: &str = "feedback_analysis.csv";

pub const EXPORT_HEADER: [&str; 8] = [
    "id",
    "text",
    "language",
    "classification",
    "confidence",
    "sentiment",
    "polarity",
    "timestamp",
];

/// Write records as CSV with a header row, one row per record
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a FeedbackRecord>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Written explicitly so an empty export still carries the header
    csv_writer.write_record(EXPORT_HEADER)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render records as a CSV string
pub fn to_csv_string<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a FeedbackRecord>,
{
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records)?;
    String::from_utf8(buffer)
        .map_err(|e| feedcheck_core::Error::internal(format!("export produced invalid UTF-8: {e}")))
}
