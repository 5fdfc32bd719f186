//! English polarity lexicon
//!
//! Word-level polarity in [-1, 1] averaged over every sentiment-bearing word
//! in the text. A preceding intensifier scales a word's polarity, and a
//! preceding negation flips it at half strength.

use regex::Regex;
use std::collections::HashMap;

const WORDS: &[(&str, f64)] = &[
    // positive
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("fantastic", 0.4),
    ("wonderful", 1.0),
    ("perfect", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("nice", 0.6),
    ("love", 0.5),
    ("loved", 0.7),
    ("loves", 0.5),
    ("like", 0.2),
    ("liked", 0.4),
    ("happy", 0.8),
    ("glad", 0.5),
    ("pleased", 0.5),
    ("satisfied", 0.5),
    ("recommend", 0.35),
    ("recommended", 0.35),
    ("helpful", 0.5),
    ("friendly", 0.4),
    ("quick", 0.33),
    ("fast", 0.2),
    ("easy", 0.43),
    ("smooth", 0.4),
    ("reliable", 0.5),
    ("comfortable", 0.4),
    ("beautiful", 0.85),
    ("lovely", 0.5),
    ("fresh", 0.3),
    ("clean", 0.37),
    ("superb", 1.0),
    ("brilliant", 0.9),
    ("outstanding", 0.5),
    ("impressive", 1.0),
    ("impressed", 0.6),
    ("exceptional", 0.67),
    ("delightful", 1.0),
    ("enjoyed", 0.5),
    ("enjoy", 0.4),
    ("worth", 0.3),
    ("affordable", 0.3),
    ("cheap", 0.4),
    ("durable", 0.4),
    ("sturdy", 0.3),
    ("polite", 0.4),
    ("professional", 0.1),
    ("prompt", 0.3),
    ("efficient", 0.4),
    ("solid", 0.2),
    ("fine", 0.42),
    ("cool", 0.35),
    ("fun", 0.3),
    ("super", 0.33),
    ("incredible", 0.9),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("grateful", 0.5),
    ("favorite", 0.5),
    ("favourite", 0.5),
    ("genuine", 0.4),
    ("authentic", 0.5),
    ("correct", 0.2),
    ("right", 0.29),
    ("well", 0.2),
    ("positive", 0.23),
    ("success", 0.3),
    ("successful", 0.75),
    ("valuable", 0.5),
    ("useful", 0.3),
    ("convenient", 0.3),
    ("fair", 0.7),
    ("tasty", 0.5),
    ("delicious", 1.0),
    ("stylish", 0.5),
    // negative
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("poor", -0.4),
    ("hate", -0.8),
    ("hated", -0.9),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("disappointment", -0.6),
    ("useless", -0.5),
    ("broken", -0.4),
    ("broke", -0.4),
    ("defective", -0.6),
    ("faulty", -0.5),
    ("damaged", -0.5),
    ("slow", -0.3),
    ("late", -0.3),
    ("delayed", -0.3),
    ("rude", -0.3),
    ("unhelpful", -0.5),
    ("expensive", -0.5),
    ("overpriced", -0.6),
    ("waste", -0.2),
    ("wasted", -0.2),
    ("fake", -0.5),
    ("cheated", -0.6),
    ("scam", -0.8),
    ("fraud", -0.8),
    ("wrong", -0.5),
    ("dirty", -0.6),
    ("ugly", -0.7),
    ("annoying", -0.8),
    ("frustrating", -0.4),
    ("frustrated", -0.7),
    ("angry", -0.5),
    ("sad", -0.5),
    ("unhappy", -0.6),
    ("pathetic", -1.0),
    ("disgusting", -1.0),
    ("nasty", -1.0),
    ("mediocre", -0.5),
    ("boring", -1.0),
    ("difficult", -0.5),
    ("hard", -0.29),
    ("complicated", -0.5),
    ("cheap-looking", -0.5),
    ("flimsy", -0.4),
    ("unreliable", -0.5),
    ("unacceptable", -0.6),
    ("problem", -0.2),
    ("problems", -0.2),
    ("issue", -0.1),
    ("issues", -0.1),
    ("fail", -0.5),
    ("failed", -0.5),
    ("refund", -0.1),
    ("stale", -0.5),
    ("smelly", -0.5),
    ("tasteless", -0.5),
    ("negative", -0.3),
    ("sucks", -0.8),
    ("dissatisfied", -0.6),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("super", 1.3),
    ("absolutely", 1.4),
    ("totally", 1.3),
    ("incredibly", 1.4),
    ("truly", 1.3),
    ("too", 1.2),
    ("most", 1.2),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("slightly", 0.5),
    ("somewhat", 0.6),
    ("barely", 0.4),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "hardly", "without", "cannot", "nothing",
];

const NEGATION_FACTOR: f64 = -0.5;

/// English word-polarity lexicon with intensifier and negation handling
#[derive(Debug, Clone)]
pub struct PolarityLexicon {
    words: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    tokenizer: Regex,
}

impl PolarityLexicon {
    pub fn new() -> Self {
        Self {
            words: WORDS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            // Words with optional inner apostrophes or hyphens ("don't", "cheap-looking")
            tokenizer: Regex::new(r"[a-z]+(?:['’-][a-z]+)*").expect("static tokenizer regex"),
        }
    }

    /// Polarity of `text` in [-1, 1]; 0.0 when no word carries sentiment
    pub fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = self
            .tokenizer
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        let assessments: Vec<f64> = tokens
            .iter()
            .enumerate()
            .filter_map(|(idx, token)| self.assess(&tokens, idx, token))
            .collect();

        if assessments.is_empty() {
            return 0.0;
        }

        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        mean.clamp(-1.0, 1.0)
    }

    fn assess(&self, tokens: &[&str], idx: usize, token: &str) -> Option<f64> {
        // An intensifier directly before a sentiment word modifies it instead
        // of being scored on its own
        if self.intensifiers.contains_key(token)
            && tokens
                .get(idx + 1)
                .is_some_and(|next| self.words.contains_key(*next))
        {
            return None;
        }

        let mut polarity = *self.words.get(token)?;
        let mut cursor = idx;

        if let Some(intensity) = cursor
            .checked_sub(1)
            .and_then(|prev| self.intensifiers.get(tokens[prev]))
        {
            polarity *= intensity;
            cursor -= 1;
        }

        if cursor
            .checked_sub(1)
            .is_some_and(|prev| is_negation(tokens[prev]))
        {
            polarity *= NEGATION_FACTOR;
        }

        Some(polarity.clamp(-1.0, 1.0))
    }
}

impl Default for PolarityLexicon {
    fn default() -> Self {
        Self::new()
    }
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't") || token.ends_with("n’t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_sentiment_words() {
        let lexicon = PolarityLexicon::new();
        assert_eq!(lexicon.polarity("The parcel arrived on Tuesday"), 0.0);
        assert_eq!(lexicon.polarity(""), 0.0);
    }

    #[test]
    fn test_average_of_words() {
        let lexicon = PolarityLexicon::new();
        // good (0.7) and bad (-0.7)
        assert!(lexicon.polarity("good screen, bad battery").abs() < 1e-9);
        assert!((lexicon.polarity("Excellent") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_intensifier_scales() {
        let lexicon = PolarityLexicon::new();
        let plain = lexicon.polarity("it was good");
        let boosted = lexicon.polarity("it was very good");
        assert!(boosted > plain);
        assert!((boosted - 0.91).abs() < 1e-9);
    }

    #[test]
    fn test_negation_flips_at_half_strength() {
        let lexicon = PolarityLexicon::new();
        assert!((lexicon.polarity("not good") + 0.35).abs() < 1e-9);
        assert!((lexicon.polarity("I don't like it") + 0.1).abs() < 1e-9);
        assert!(lexicon.polarity("not very good") < 0.0);
    }

    #[test]
    fn test_case_insensitive_and_clamped() {
        let lexicon = PolarityLexicon::new();
        assert!((lexicon.polarity("ABSOLUTELY PERFECT") - 1.0).abs() < 1e-9);
        assert!((lexicon.polarity("extremely terrible") + 1.0).abs() < 1e-9);
    }
}
