//! Sentiment labels and the result types returned by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SentimentError;

/// Sentiment of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// All labels, in the order used by distributions.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    /// Wire name of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = SentimentError;

    /// Parses a sentiment filter value. Only the exact lowercase names are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            other => Err(SentimentError::Validation(format!(
                "Invalid sentiment value: '{}'",
                other
            ))),
        }
    }
}

/// Which strategy produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    MachineLearning,
    Dictionary,
    EmptyText,
}

impl AnalysisMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMethod::MachineLearning => "machine_learning",
            AnalysisMethod::Dictionary => "dictionary",
            AnalysisMethod::EmptyText => "empty_text",
        }
    }
}

impl fmt::Display for AnalysisMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Probability mass per label. Always carries exactly the three labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SentimentDistribution {
    /// Returned for empty input and whenever inference fails.
    pub const DEFAULT: SentimentDistribution = SentimentDistribution {
        positive: 0.33,
        negative: 0.33,
        neutral: 0.34,
    };

    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    pub fn set(&mut self, label: SentimentLabel, value: f64) {
        match label {
            SentimentLabel::Positive => self.positive = value,
            SentimentLabel::Negative => self.negative = value,
            SentimentLabel::Neutral => self.neutral = value,
        }
    }

    /// (label, probability) pairs in `SentimentLabel::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (SentimentLabel, f64)> + '_ {
        SentimentLabel::ALL.into_iter().map(move |label| (label, self.get(label)))
    }

    pub fn sum(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }

    /// Label with the highest probability. Ties resolve in `ALL` order.
    pub fn top(&self) -> SentimentLabel {
        let mut best = SentimentLabel::Positive;
        let mut best_p = f64::NEG_INFINITY;
        for (label, p) in self.iter() {
            if p > best_p {
                best = label;
                best_p = p;
            }
        }
        best
    }
}

impl Default for SentimentDistribution {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Label-only answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
}

/// Label plus the strategy that produced it and, for the model path, its distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedSentimentResult {
    pub label: SentimentLabel,
    pub method: AnalysisMethod,
    pub distribution: Option<SentimentDistribution>,
}

impl DetailedSentimentResult {
    pub fn empty_text() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            method: AnalysisMethod::EmptyText,
            distribution: Some(SentimentDistribution::DEFAULT),
        }
    }
}
