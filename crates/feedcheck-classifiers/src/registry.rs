//! Startup model loading
//!
//! Models are loaded once. A model that fails to load is logged and leaves
//! its slot `Unavailable`; the rest of the system keeps running.

use crate::authenticity::{AuthenticityClassifier, ModelSlot};
use crate::classifier::Classifier;
use crate::model_config::ModelRegistry;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Load one registry entry into a slot
pub fn load_slot(registry: &ModelRegistry, key: &str) -> ModelSlot<Arc<dyn Classifier>> {
    let Some(config) = registry.get_model(key) else {
        warn!("Model '{}' not found in registry", key);
        return ModelSlot::unavailable(format!("model '{}' not found in registry", key));
    };

    match load_configured(key, config) {
        Ok(model) => {
            info!("✓ Loaded model: {}", key);
            ModelSlot::Ready(model)
        }
        Err(e) => {
            warn!("✗ Failed to load model {}: {}", key, e);
            ModelSlot::unavailable(e.to_string())
        }
    }
}

#[cfg(feature = "ml-models")]
fn load_configured(
    key: &str,
    config: &crate::model_config::ModelConfig,
) -> feedcheck_core::Result<Arc<dyn Classifier>> {
    crate::model_loader::load_model(key, config)
}

#[cfg(not(feature = "ml-models"))]
fn load_configured(
    _key: &str,
    _config: &crate::model_config::ModelConfig,
) -> feedcheck_core::Result<Arc<dyn Classifier>> {
    Err(feedcheck_core::Error::model_unavailable(
        "built without the ml-models feature",
    ))
}

/// Build the authenticity classifier from two registry keys
pub fn load_authenticity_classifier(
    registry: &ModelRegistry,
    english_key: &str,
    multilingual_key: &str,
) -> AuthenticityClassifier {
    info!(
        "Initializing models from registry v{} ({} entries)",
        registry.version,
        registry.models.len()
    );

    let classifier = AuthenticityClassifier::new(
        load_slot(registry, english_key),
        load_slot(registry, multilingual_key),
    );

    info!(
        english = classifier.english_ready(),
        multilingual = classifier.multilingual_ready(),
        "Model initialization complete"
    );
    classifier
}

/// Like [`load_authenticity_classifier`], reading the registry from a file.
///
/// An unreadable registry leaves both slots unavailable.
pub fn load_authenticity_classifier_from_file(
    path: impl AsRef<Path>,
    english_key: &str,
    multilingual_key: &str,
) -> AuthenticityClassifier {
    match ModelRegistry::from_file(path.as_ref()) {
        Ok(registry) => load_authenticity_classifier(&registry, english_key, multilingual_key),
        Err(e) => {
            warn!("Model registry unavailable: {}", e);
            let reason = e.to_string();
            AuthenticityClassifier::new(
                ModelSlot::unavailable(reason.clone()),
                ModelSlot::unavailable(reason),
            )
        }
    }
}
