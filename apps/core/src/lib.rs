//! Review sentiment engine.
//!
//! Classifies short review texts as positive, negative or neutral with a
//! trained TF-IDF + Naive Bayes model, falling back to a stem dictionary.

pub mod config;
pub mod error;
pub mod fs_manager;
pub mod sentiment;

pub use config::SentimentConfig;
pub use error::{Result, SentimentError};
pub use sentiment::{
    AnalysisMethod, DetailedSentimentResult, EngineMode, SentimentAnalyzer, SentimentDistribution,
    SentimentLabel, SentimentModel, TrainingExample, TrainingReport,
};

#[cfg(test)]
mod tests;
