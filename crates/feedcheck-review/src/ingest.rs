//! CSV upload ingestion

use feedcheck_core::{Error, Result};
use std::io::Read;

/// Columns searched for feedback text, in preference order
pub const FEEDBACK_COLUMNS: [&str; 2] = ["feedback", "text"];

/// Cells read as missing values rather than text
const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Read the feedback column of a CSV upload.
///
/// Missing cells are skipped. A column holding only numbers carries no
/// feedback and yields nothing; in a text column numeric-looking cells such
/// as "10" are kept. The file must have a header row naming a `feedback` or
/// `text` column, and an unreadable file is an input error.
pub fn read_feedback_texts<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(unreadable)?.clone();
    let column = FEEDBACK_COLUMNS
        .iter()
        .find_map(|name| headers.iter().position(|header| header == *name))
        .ok_or_else(|| Error::invalid_input("File must contain a 'feedback' or 'text' column"))?;

    let mut cells = Vec::new();
    let mut missing = 0usize;
    for row in csv_reader.records() {
        let row = row.map_err(unreadable)?;
        match row.get(column) {
            Some(cell) if !MISSING_MARKERS.contains(&cell) => cells.push(cell.to_string()),
            _ => missing += 1,
        }
    }

    let numeric_column = !cells.is_empty() && cells.iter().all(|cell| is_numeric(cell));
    if numeric_column {
        tracing::debug!(column = &headers[column], cells = cells.len(), "numeric column skipped");
        cells.clear();
    }

    tracing::debug!(
        column = &headers[column],
        rows = cells.len(),
        missing,
        "csv upload parsed"
    );
    Ok(cells)
}

fn is_numeric(cell: &str) -> bool {
    cell.trim().parse::<f64>().is_ok()
}

fn unreadable(err: csv::Error) -> Error {
    Error::invalid_input(format!("Could not read the uploaded file: {err}"))
}
