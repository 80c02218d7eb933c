//! Sentiment Analyzer - orchestrator of the engine.
//!
//! Picks a strategy once at construction:
//! 1. Trained TF-IDF + Naive Bayes model (when enabled and loadable)
//! 2. Stem dictionary, used when the model is disabled or unavailable
//!
//! Model failures on the hot path fall back to the dictionary; a request
//! always gets one of the three labels.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

use super::corpus::{default_corpus, extended_corpus, TrainingExample};
use super::label::{AnalysisMethod, DetailedSentimentResult, SentimentLabel, SentimentResult};
use super::lexicon::DictionaryClassifier;
use super::model::{SentimentModel, TrainingReport};
use crate::config::SentimentConfig;
use crate::error::Result;

/// Strategy currently in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineMode {
    MachineLearning,
    DictionaryOnly,
}

/// Snapshot of the analyzer state, for diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub mode: EngineMode,
    pub ml_requested: bool,
    pub model_loaded: bool,
    pub model_ready: bool,
    pub artifact_path: Option<PathBuf>,
    pub last_training: Option<TrainingReport>,
}

pub struct SentimentAnalyzer {
    /// `None` when the model was disabled by configuration
    model: Option<SentimentModel>,
    ml_active: AtomicBool,
    dictionary: DictionaryClassifier,
}

impl SentimentAnalyzer {
    /// Build an analyzer. With `use_ml`, the model is loaded (or trained on
    /// first run) immediately; any failure leaves the analyzer in dictionary mode.
    pub fn new(use_ml: bool, model_path: impl Into<PathBuf>) -> Self {
        if use_ml {
            Self::with_model(SentimentModel::new(model_path))
        } else {
            Self::dictionary_only()
        }
    }

    pub fn from_config(config: &SentimentConfig) -> Self {
        Self::new(config.use_ml_sentiment, config.model_path.clone())
    }

    /// Analyzer that never consults a model.
    pub fn dictionary_only() -> Self {
        info!("Sentiment analyzer running in dictionary mode");
        Self {
            model: None,
            ml_active: AtomicBool::new(false),
            dictionary: DictionaryClassifier::new(),
        }
    }

    /// Analyzer around an existing model handle. A handle that already holds
    /// a model is used as is.
    pub fn with_model(model: SentimentModel) -> Self {
        let active = match Self::initialize(&model) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to initialize ML model: {}", e);
                warn!("Falling back to dictionary approach");
                false
            }
        };

        Self {
            model: Some(model),
            ml_active: AtomicBool::new(active),
            dictionary: DictionaryClassifier::new(),
        }
    }

    fn initialize(model: &SentimentModel) -> Result<()> {
        if model.is_loaded() {
            return Ok(());
        }
        if !model.is_ready() {
            info!("Training ML model for the first time...");
            model.train_default().map(|_| ())
        } else {
            model.load()
        }
    }

    pub fn mode(&self) -> EngineMode {
        if self.active_model().is_some() {
            EngineMode::MachineLearning
        } else {
            EngineMode::DictionaryOnly
        }
    }

    /// The model handle, if one was configured (active or not).
    pub fn model(&self) -> Option<&SentimentModel> {
        self.model.as_ref()
    }

    fn active_model(&self) -> Option<&SentimentModel> {
        self.model
            .as_ref()
            .filter(|_| self.ml_active.load(Ordering::Acquire))
    }

    /// Label for `text`. Always one of the three labels.
    pub fn analyze(&self, text: &str) -> SentimentLabel {
        if text.trim().is_empty() {
            return SentimentLabel::Neutral;
        }

        if let Some(model) = self.active_model() {
            match model.predict_checked(text) {
                Ok(label) => return label,
                Err(e) => warn!("ML prediction failed: {}, falling back to dictionary", e),
            }
        }

        self.dictionary.classify(text)
    }

    pub fn analyze_result(&self, text: &str) -> SentimentResult {
        SentimentResult {
            label: self.analyze(text),
        }
    }

    /// Label plus the method used and, on the model path, the class distribution.
    pub fn analyze_detailed(&self, text: &str) -> DetailedSentimentResult {
        if text.trim().is_empty() {
            return DetailedSentimentResult::empty_text();
        }

        if let Some(model) = self.active_model() {
            match model.predict_detailed_checked(text) {
                Ok((label, distribution)) => {
                    return DetailedSentimentResult {
                        label,
                        method: AnalysisMethod::MachineLearning,
                        distribution: Some(distribution),
                    }
                }
                Err(e) => warn!("ML prediction failed: {}", e),
            }
        }

        DetailedSentimentResult {
            label: self.dictionary.classify(text),
            method: AnalysisMethod::Dictionary,
            distribution: None,
        }
    }

    /// Retrain on the default corpus plus `additional_examples`.
    ///
    /// Returns `Ok(None)` when the model is disabled by configuration. On
    /// failure the error is logged and returned; the previous model stays
    /// active. A successful retrain re-enables the model path if
    /// initialization had failed.
    pub fn retrain(&self, additional_examples: &[TrainingExample]) -> Result<Option<TrainingReport>> {
        let Some(model) = self.model.as_ref() else {
            warn!("ML is disabled, cannot retrain model");
            return Ok(None);
        };

        let corpus = if additional_examples.is_empty() {
            default_corpus()
        } else {
            extended_corpus(additional_examples)
        };

        match model.train(&corpus) {
            Ok(report) => {
                if !self.ml_active.swap(true, Ordering::AcqRel) {
                    info!("ML model available again, leaving dictionary mode");
                }
                info!("Model retrained successfully");
                Ok(Some(report))
            }
            Err(e) => {
                error!("Failed to retrain model: {}", e);
                Err(e)
            }
        }
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            mode: self.mode(),
            ml_requested: self.model.is_some(),
            model_loaded: self.model.as_ref().is_some_and(|m| m.is_loaded()),
            model_ready: self.model.as_ref().is_some_and(|m| m.is_ready()),
            artifact_path: self.model.as_ref().map(|m| m.artifact_path().to_path_buf()),
            last_training: self.model.as_ref().and_then(|m| m.report()),
        }
    }
}
