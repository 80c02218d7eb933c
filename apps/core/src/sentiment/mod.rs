//! # Sentiment Module
//!
//! Three-label sentiment analysis for short reviews.
//!
//! ## Components
//! - `lexicon`: stem dictionary classifier (terminal fallback)
//! - `vectorizer`: TF-IDF over unigrams and bigrams
//! - `naive_bayes`: multinomial Naive Bayes
//! - `split`: seeded stratified train/eval split
//! - `model`: trainable, persistable statistical classifier
//! - `corpus`: training examples and the bundled corpus
//! - `label`: labels and result types
//! - `analyzer`: main orchestrator

pub mod analyzer;
pub mod corpus;
pub mod label;
pub mod lexicon;
pub mod model;
pub mod naive_bayes;
pub mod split;
pub mod vectorizer;

pub use analyzer::{EngineMode, EngineStatus, SentimentAnalyzer};
pub use corpus::{default_corpus, TrainingExample};
pub use label::{
    AnalysisMethod, DetailedSentimentResult, SentimentDistribution, SentimentLabel,
    SentimentResult,
};
pub use lexicon::{DictionaryClassifier, LexiconScore};
pub use model::{SentimentModel, TrainingReport};
