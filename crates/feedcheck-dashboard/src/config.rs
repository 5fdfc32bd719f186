//! Dashboard configuration

use feedcheck_review::{DEFAULT_KEYWORD_LIMIT, DEFAULT_MAX_BATCH_ROWS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Model registry YAML
    #[serde(default = "default_models_path")]
    pub models_path: String,

    /// Registry key of the English model
    #[serde(default = "default_english_model")]
    pub english_model: String,

    /// Registry key of the multilingual model
    #[serde(default = "default_multilingual_model")]
    pub multilingual_model: String,

    /// Rows accepted per batch or upload
    #[serde(default = "default_max_batch_rows")]
    pub max_batch_rows: usize,

    /// Keywords returned per class
    #[serde(default = "default_keyword_limit")]
    pub keyword_limit: usize,

    /// Live sessions kept; the least recently used one is evicted beyond this
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl DashboardConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, models_override: Option<&str>) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            tracing::debug!("No config at {}, using defaults", config_path);
            Self::default()
        };

        // Apply CLI overrides
        if let Some(models) = models_override {
            config.models_path = models.to_string();
        }

        anyhow::ensure!(config.max_sessions > 0, "max_sessions must be at least 1");
        Ok(config)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            models_path: default_models_path(),
            english_model: default_english_model(),
            multilingual_model: default_multilingual_model(),
            max_batch_rows: default_max_batch_rows(),
            keyword_limit: default_keyword_limit(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_models_path() -> String {
    "./models/registry.yaml".to_string()
}

fn default_english_model() -> String {
    "english".to_string()
}

fn default_multilingual_model() -> String {
    "multilingual".to_string()
}

fn default_max_batch_rows() -> usize {
    DEFAULT_MAX_BATCH_ROWS
}

fn default_keyword_limit() -> usize {
    DEFAULT_KEYWORD_LIMIT
}

fn default_max_sessions() -> usize {
    256
}
