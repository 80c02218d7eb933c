use std::io;
use thiserror::Error;

/// Engine-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// The training corpus cannot produce a well-formed model (empty or single-label).
    #[error("Training data error: {0}")]
    TrainingData(String),

    /// No model is held in memory and none could be loaded or trained.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Unexpected failure while scoring a text. Never leaves the inference boundary.
    #[error("Inference failure: {0}")]
    Inference(String),

    /// Represents standard input/output errors, typically around the artifact file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The artifact on disk could not be encoded or decoded.
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents data validation errors (e.g., an unknown sentiment label).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<bincode::Error> for SentimentError {
    fn from(err: bincode::Error) -> Self {
        SentimentError::Artifact(format!("bincode error: {}", err))
    }
}

impl From<serde_json::Error> for SentimentError {
    fn from(err: serde_json::Error) -> Self {
        SentimentError::Validation(format!("JSON error: {}", err))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SentimentError>;
