use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "feedcheck-dashboard")]
#[command(
    author,
    version,
    about = "Feedback authenticity and sentiment dashboard"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the dashboard server with web UI
    Start {
        /// Listen port
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,

        /// Dashboard config path
        #[arg(short, long, default_value = "./config/dashboard.yaml")]
        config: String,

        /// Model registry path (overrides the config file)
        #[arg(short, long, env = "FEEDCHECK_MODELS")]
        models: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze feedback once and print the records as CSV
    Analyze {
        /// Language: auto, English, Hindi, Telugu (or en, hi, te)
        #[arg(short, long, default_value = "auto")]
        language: String,

        /// CSV file with a `feedback` or `text` column
        #[arg(short, long)]
        file: Option<String>,

        /// Feedback texts, analyzed in order after the file rows
        texts: Vec<String>,

        /// Dashboard config path
        #[arg(short, long, default_value = "./config/dashboard.yaml")]
        config: String,

        /// Model registry path (overrides the config file)
        #[arg(short, long, env = "FEEDCHECK_MODELS")]
        models: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}
