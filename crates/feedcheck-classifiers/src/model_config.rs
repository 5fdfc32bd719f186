//! Model configuration and registry structures

use feedcheck_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Model registry containing all available models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRegistry {
    pub version: String,
    pub models: HashMap<String, ModelConfig>,
}

/// Configuration for a single model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name
    #[serde(default)]
    pub name: String,

    /// Model description
    #[serde(default)]
    pub description: String,

    /// Model source (where to load from)
    pub source: ModelSource,

    /// Model architecture configuration
    pub architecture: ArchitectureConfig,

    /// Inference settings
    #[serde(default)]
    pub inference: InferenceConfig,
}

/// Model source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ModelSource {
    /// Load from local filesystem
    Local { path: PathBuf },

    /// Download from HuggingFace Hub
    HuggingFace {
        repo: String,
        #[serde(default = "default_revision")]
        revision: String,
    },

    /// Built into the binary; carries no weights
    Builtin { implementation: String },
}

fn default_revision() -> String {
    "main".to_string()
}

/// Model architecture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ArchitectureConfig {
    /// BERT for sequence classification (pooled [CLS] output)
    BertSequenceClassification {
        num_labels: usize,
        #[serde(default)]
        labels: Vec<String>,
    },

    /// DistilBERT for sequence classification
    DistilBertSequenceClassification {
        num_labels: usize,
        #[serde(default)]
        labels: Vec<String>,
    },
}

impl ArchitectureConfig {
    pub fn num_labels(&self) -> usize {
        match self {
            Self::BertSequenceClassification { num_labels, .. }
            | Self::DistilBertSequenceClassification { num_labels, .. } => *num_labels,
        }
    }

    /// Labels declared in the registry; empty means "read from config.json"
    pub fn labels(&self) -> &[String] {
        match self {
            Self::BertSequenceClassification { labels, .. }
            | Self::DistilBertSequenceClassification { labels, .. } => labels,
        }
    }
}

/// Inference configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Device to run on (cpu, cuda, mps)
    #[serde(default = "default_device")]
    pub device: String,

    /// Maximum sequence length
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_device() -> String {
    "cpu".to_string()
}

fn default_max_length() -> usize {
    512
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            max_length: default_max_length(),
        }
    }
}

impl ModelRegistry {
    /// Load model registry from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read model registry {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&contents)
    }

    /// Parse a model registry from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents)
            .map_err(|e| Error::config(format!("Invalid model registry: {}", e)))
    }

    /// Get a model configuration by name
    pub fn get_model(&self, name: &str) -> Option<&ModelConfig> {
        self.models.get(name)
    }
}

impl ModelConfig {
    /// Display name, falling back to the registry key
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        if self.name.is_empty() {
            key
        } else {
            &self.name
        }
    }
}
