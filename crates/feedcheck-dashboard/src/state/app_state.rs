use crate::config::DashboardConfig;
use crate::state::SessionRegistry;
use feedcheck_review::FeedbackAnalyzer;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,

    /// Pipeline shared by every session; models are loaded once
    pub analyzer: Arc<FeedbackAnalyzer>,

    pub sessions: Arc<SessionRegistry>,

    /// Prometheus recorder handle, absent when no recorder was installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        config: DashboardConfig,
        analyzer: FeedbackAnalyzer,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Self {
        let analyzer = analyzer.with_max_batch_rows(config.max_batch_rows);
        Self {
            sessions: Arc::new(SessionRegistry::new(config.max_sessions)),
            config: Arc::new(config),
            analyzer: Arc::new(analyzer),
            metrics_handle,
        }
    }
}
