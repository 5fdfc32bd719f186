//! Language bucketing for submitted feedback
//!
//! Detection is many-to-one: whatever the statistical detector reports is
//! folded into English, Hindi or Telugu, and an inconclusive result is
//! English.

use feedcheck_core::{Language, LanguageSelection};
use whatlang::Lang;

/// Statistical language detector backed by whatlang
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the language for a submission.
    ///
    /// A fixed selection is returned verbatim without running detection.
    pub fn resolve(&self, text: &str, selection: LanguageSelection) -> Language {
        match selection {
            LanguageSelection::Fixed(language) => language,
            LanguageSelection::Auto => self.detect(text),
        }
    }

    /// Detect the language bucket of `text`
    pub fn detect(&self, text: &str) -> Language {
        let Some(info) = whatlang::detect(text) else {
            tracing::debug!("language detection inconclusive, defaulting to English");
            return Language::English;
        };

        let language = bucket(info.lang());
        tracing::debug!(
            detected = ?info.lang(),
            confidence = info.confidence(),
            bucket = %language,
            "language detected"
        );
        language
    }
}

fn bucket(lang: Lang) -> Language {
    match lang {
        Lang::Hin => Language::Hindi,
        Lang::Tel => Language::Telugu,
        _ => Language::English,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_selection_skips_detection() {
        let detector = LanguageDetector::new();
        let hindi_text = "यह उत्पाद बहुत अच्छा है और मैं इसे सभी को सुझाता हूँ";

        assert_eq!(
            detector.resolve(hindi_text, LanguageSelection::Fixed(Language::Telugu)),
            Language::Telugu
        );
    }

    #[test]
    fn test_detects_scripts() {
        let detector = LanguageDetector::new();

        assert_eq!(
            detector.detect("यह उत्पाद बहुत अच्छा है और मैं इसे सभी को सुझाता हूँ, सेवा भी शानदार थी"),
            Language::Hindi
        );
        assert_eq!(
            detector.detect("ఈ ఉత్పత్తి చాలా బాగుంది, నేను అందరికీ సిఫార్సు చేస్తున్నాను"),
            Language::Telugu
        );
        assert_eq!(
            detector.detect("The delivery was quick and the packaging was excellent"),
            Language::English
        );
    }

    #[test]
    fn test_other_languages_fold_into_english() {
        let detector = LanguageDetector::new();

        assert_eq!(
            detector.detect("Le produit est arrivé en retard mais la qualité est excellente"),
            Language::English
        );
        assert_eq!(detector.detect(""), Language::English);
        assert_eq!(detector.detect("!!! ???"), Language::English);
    }
}
