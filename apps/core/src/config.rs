//! Engine configuration loaded from `.env` and the process environment.

use crate::error::{Result, SentimentError};
use crate::fs_manager::PortablePathManager;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variable toggling the statistical classifier.
pub const USE_ML_ENV: &str = "USE_ML_SENTIMENT";
/// Environment variable overriding the artifact location.
pub const MODEL_PATH_ENV: &str = "SENTIMENT_MODEL_PATH";

/// Settings consumed by the sentiment engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentConfig {
    /// Use the trained model (true) or the stem dictionary only (false).
    pub use_ml_sentiment: bool,
    /// Where the model artifact is persisted.
    pub model_path: PathBuf,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            use_ml_sentiment: true,
            model_path: PortablePathManager::default_model_path(),
        }
    }
}

impl SentimentConfig {
    /// Loads `.env` (if any) then reads the environment.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Reads the settings from the current process environment only.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(raw) = env::var(USE_ML_ENV) {
            config.use_ml_sentiment = parse_bool(&raw).ok_or_else(|| {
                SentimentError::Config(format!("{} must be a boolean, got '{}'", USE_ML_ENV, raw))
            })?;
        }

        if let Ok(raw) = env::var(MODEL_PATH_ENV) {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(SentimentError::Config(format!("{} is empty", MODEL_PATH_ENV)));
            }
            config.model_path = PathBuf::from(trimmed);
        }

        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
