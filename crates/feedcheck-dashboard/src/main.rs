//! FeedCheck Dashboard
//!
//! Serves the feedback dashboard or runs a one-shot analysis from the
//! command line.

use anyhow::Result;
use clap::Parser;
use feedcheck_classifiers::{load_authenticity_classifier_from_file, AuthenticityClassifier};
use feedcheck_core::LanguageSelection;
use feedcheck_dashboard::cli::{Cli, Commands};
use feedcheck_dashboard::server::run_server;
use feedcheck_dashboard::state::AppState;
use feedcheck_dashboard::DashboardConfig;
use feedcheck_review::{read_feedback_texts, write_csv, FeedbackAnalyzer, ReviewStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            port,
            address,
            config,
            models,
            verbose,
        } => {
            init_tracing(verbose);

            let config = DashboardConfig::load(&config, models.as_deref())?;
            info!("Model registry: {}", config.models_path);

            let metrics_handle = init_metrics()?;
            let authenticity = load_models(&config).await?;
            let state = AppState::new(config, FeedbackAnalyzer::new(authenticity), Some(metrics_handle));

            let addr: SocketAddr = format!("{}:{}", address, port).parse()?;

            println!();
            println!("  FeedCheck dashboard");
            println!();
            println!("  Open http://{} in your browser", addr);
            println!();

            run_server(state, addr).await?;
        }

        Commands::Analyze {
            language,
            file,
            texts,
            config,
            models,
            verbose,
        } => {
            init_tracing(verbose);

            let selection: LanguageSelection = language.parse()?;
            let config = DashboardConfig::load(&config, models.as_deref())?;

            let mut rows = match &file {
                Some(path) => read_feedback_texts(std::fs::File::open(path)?)?,
                None => Vec::new(),
            };
            rows.extend(texts);
            anyhow::ensure!(!rows.is_empty(), "No feedback given; pass texts or --file");

            let authenticity = load_models(&config).await?;
            let analyzer =
                FeedbackAnalyzer::new(authenticity).with_max_batch_rows(config.max_batch_rows);
            let mut store = ReviewStore::new();

            let report = analyzer.analyze_batch(&mut store, &rows, selection).await?;

            write_csv(std::io::stdout().lock(), store.records())?;
            for failure in &report.failures {
                eprintln!("row {}: {}", failure.row, failure.reason);
            }
            info!(
                total = report.total,
                stored = report.stored.len(),
                failed = report.failures.len(),
                "analysis complete"
            );
        }
    }

    Ok(())
}

/// Load both models once; inference setup blocks, so keep it off the runtime
async fn load_models(config: &DashboardConfig) -> Result<AuthenticityClassifier> {
    let path = config.models_path.clone();
    let english = config.english_model.clone();
    let multilingual = config.multilingual_model.clone();

    let authenticity = tokio::task::spawn_blocking(move || {
        load_authenticity_classifier_from_file(&path, &english, &multilingual)
    })
    .await?;
    Ok(authenticity)
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("feedcheck=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("feedcheck=info"))
    };

    // Logs go to stderr so `analyze` output stays clean CSV
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "feedcheck_submissions_total",
        "Feedback submissions by outcome"
    );
    metrics::describe_counter!(
        "feedcheck_records_total",
        "Stored records by classification, sentiment and language"
    );
    metrics::describe_histogram!(
        "feedcheck_analysis_latency_us",
        metrics::Unit::Microseconds,
        "Per-submission analysis latency in microseconds"
    );
    metrics::describe_histogram!(
        "feedcheck_model_latency_us",
        metrics::Unit::Microseconds,
        "Model inference latency in microseconds by language"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
