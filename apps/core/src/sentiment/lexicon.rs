//! Dictionary classifier using fixed Russian word stems.
//!
//! Terminal fallback of the engine: pure, total, no model required.

use serde::{Deserialize, Serialize};

use super::label::SentimentLabel;

/// Stems counted as positive evidence
const POSITIVE_STEMS: &[&str] = &[
    "хорош",
    "люблю",
    "отлично",
    "супер",
    "замечательно",
    "прекрасно",
    "великолепно",
    "нравится",
    "классно",
    "отличный",
    "хороший",
    "превосходно",
    "восхитительно",
];

/// Stems counted as negative evidence
const NEGATIVE_STEMS: &[&str] = &[
    "плохо",
    "ненавиж",
    "ужасно",
    "отвратительно",
    "кошмар",
    "не нравится",
    "плохой",
    "худший",
    "провал",
    "ужас",
    "отвратительный",
    "кошмарный",
    "ненавижу",
];

/// Stem hit counts for a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconScore {
    pub positive: usize,
    pub negative: usize,
}

impl LexiconScore {
    pub fn label(&self) -> SentimentLabel {
        if self.positive > self.negative {
            SentimentLabel::Positive
        } else if self.negative > self.positive {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// Substring-matching sentiment classifier
#[derive(Debug, Clone, Default)]
pub struct DictionaryClassifier;

impl DictionaryClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Count how many stems of each set occur in the lowercased text.
    /// Each stem contributes at most one hit.
    pub fn score(&self, text: &str) -> LexiconScore {
        let normalized = text.to_lowercase();
        let count = |stems: &[&str]| stems.iter().filter(|s| normalized.contains(**s)).count();

        LexiconScore {
            positive: count(POSITIVE_STEMS),
            negative: count(NEGATIVE_STEMS),
        }
    }

    pub fn classify(&self, text: &str) -> SentimentLabel {
        self.score(text).label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let classifier = DictionaryClassifier::new();
        let score = classifier.score("Это просто прекрасно, отлично!");
        assert_eq!(score, LexiconScore { positive: 2, negative: 0 });
        assert_eq!(score.label(), SentimentLabel::Positive);
    }

    #[test]
    fn test_tie_is_neutral() {
        let classifier = DictionaryClassifier::new();
        assert_eq!(
            classifier.classify("плохой товар, но хороший сервис"),
            SentimentLabel::Neutral
        );
    }

    #[test]
    fn test_negative_text() {
        let classifier = DictionaryClassifier::new();
        assert_eq!(
            classifier.classify("Ужасно, худший заказ в моей жизни"),
            SentimentLabel::Negative
        );
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = DictionaryClassifier::new();
        assert_eq!(classifier.classify("СУПЕР"), SentimentLabel::Positive);
    }

    #[test]
    fn test_repeated_stem_counts_once() {
        let classifier = DictionaryClassifier::new();
        let score = classifier.score("супер супер супер, но провал");
        assert_eq!(score, LexiconScore { positive: 1, negative: 1 });
        assert_eq!(score.label(), SentimentLabel::Neutral);
    }

    #[test]
    fn test_no_matches_and_empty() {
        let classifier = DictionaryClassifier::new();
        assert_eq!(classifier.classify(""), SentimentLabel::Neutral);
        assert_eq!(classifier.classify("   "), SentimentLabel::Neutral);
        assert_eq!(classifier.classify("Доставка заняла три дня"), SentimentLabel::Neutral);
    }
}
