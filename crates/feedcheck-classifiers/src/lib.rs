//! FeedCheck Classifiers
//!
//! Everything that turns raw feedback text into labels:
//! - Language bucketing (English, Hindi, Telugu)
//! - Authenticity classification over two pretrained transformer models
//! - Sentiment scoring with a polarity lexicon or a star rating
//!
//! Transformer inference runs on Candle behind the `ml-models` feature. Without
//! it every model slot is unavailable and only the lexicon path works.

pub mod authenticity;
pub mod classifier;
pub mod language;
pub mod lexicon;
pub mod model_config;
#[cfg(feature = "ml-models")]
pub mod model_loader;
pub mod registry;
pub mod sentiment;

pub use authenticity::{
    AuthenticityClassifier, AuthenticityVerdict, EnglishClassifier, ModelSlot,
    MultilingualClassifier, MULTILINGUAL_GENUINE_THRESHOLD,
};
pub use classifier::{ClassificationMetadata, ClassificationResult, Classifier};
pub use language::LanguageDetector;
pub use lexicon::PolarityLexicon;
pub use model_config::{ArchitectureConfig, InferenceConfig, ModelConfig, ModelRegistry, ModelSource};
pub use registry::{load_authenticity_classifier, load_authenticity_classifier_from_file, load_slot};
pub use sentiment::{SentimentScore, SentimentScorer, StarRating};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::authenticity::{AuthenticityClassifier, ModelSlot};
    pub use crate::classifier::{ClassificationResult, Classifier};
    pub use crate::language::LanguageDetector;
    pub use crate::model_config::ModelRegistry;
    pub use crate::sentiment::{SentimentScore, SentimentScorer};
}
