//! Statistical sentiment classifier: TF-IDF + multinomial Naive Bayes.
//!
//! The trained pipeline lives behind a reader-writer lock as an `Arc`
//! snapshot. Predictions clone the snapshot and score without holding the
//! lock; training builds a complete pipeline first and swaps it in. A
//! separate mutex serializes train/load/persist so two retrains never
//! interleave writes to the artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info, warn};

use super::corpus::{default_corpus, TrainingExample};
use super::label::{SentimentDistribution, SentimentLabel};
use super::naive_bayes::MultinomialNb;
use super::split::{stratified_split, EVAL_FRACTION, SPLIT_SEED};
use super::vectorizer::TfidfVectorizer;
use crate::error::{Result, SentimentError};
use crate::fs_manager::PortablePathManager;

/// Bumped whenever the serialized layout changes.
const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Summary of a training run, stored alongside the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub trained_at: DateTime<Utc>,
    pub total_examples: usize,
    pub train_size: usize,
    pub eval_size: usize,
    /// Corpus indices held out for evaluation
    pub eval_indices: Vec<usize>,
    /// Held-out accuracy, absent when the eval partition is empty
    pub accuracy: Option<f64>,
    pub vocabulary_size: usize,
    pub classes: Vec<SentimentLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TrainedPipeline {
    vectorizer: TfidfVectorizer,
    classifier: MultinomialNb,
    report: TrainingReport,
}

impl TrainedPipeline {
    fn fit(examples: &[TrainingExample]) -> Result<Self> {
        if examples.is_empty() {
            return Err(SentimentError::TrainingData("corpus is empty".to_string()));
        }

        let labels: Vec<SentimentLabel> = examples.iter().map(|e| e.label).collect();
        let distinct: BTreeSet<&str> = labels.iter().map(|l| l.as_str()).collect();
        if distinct.len() < 2 {
            return Err(SentimentError::TrainingData(format!(
                "need at least two distinct labels, got {:?}",
                distinct
            )));
        }

        let split = stratified_split(&labels, EVAL_FRACTION, SPLIT_SEED);

        let train_texts: Vec<&str> = split.train.iter().map(|&i| examples[i].text.as_str()).collect();
        let train_labels: Vec<SentimentLabel> = split.train.iter().map(|&i| labels[i]).collect();

        let mut vectorizer = TfidfVectorizer::default();
        let rows = vectorizer.fit_transform(&train_texts)?;

        let mut classifier = MultinomialNb::default();
        classifier.fit(&rows, &train_labels, vectorizer.n_features())?;

        let mut pipeline = Self {
            vectorizer,
            classifier,
            report: TrainingReport {
                trained_at: Utc::now(),
                total_examples: examples.len(),
                train_size: split.train.len(),
                eval_size: split.eval.len(),
                eval_indices: split.eval.clone(),
                accuracy: None,
                vocabulary_size: 0,
                classes: Vec::new(),
            },
        };
        pipeline.report.vocabulary_size = pipeline.vectorizer.n_features();
        pipeline.report.classes = pipeline.classifier.classes().to_vec();

        if !split.eval.is_empty() {
            let mut correct = 0usize;
            for &i in &split.eval {
                if pipeline.predict(&examples[i].text)? == labels[i] {
                    correct += 1;
                }
            }
            let accuracy = correct as f64 / split.eval.len() as f64;
            info!("Model accuracy: {:.3}", accuracy);
            pipeline.report.accuracy = Some(accuracy);
        } else {
            info!("Evaluation partition is empty; accuracy not computed");
        }

        Ok(pipeline)
    }

    fn check_consistency(&self) -> Result<()> {
        if self.vectorizer.n_features() != self.classifier.n_features() {
            return Err(SentimentError::Inference(format!(
                "vectorizer has {} features, classifier expects {}",
                self.vectorizer.n_features(),
                self.classifier.n_features()
            )));
        }
        Ok(())
    }

    fn predict(&self, text: &str) -> Result<SentimentLabel> {
        self.check_consistency()?;
        self.classifier.predict(&self.vectorizer.transform(text))
    }

    fn predict_proba(&self, text: &str) -> Result<SentimentDistribution> {
        self.check_consistency()?;
        self.classifier.predict_proba(&self.vectorizer.transform(text))
    }
}

#[derive(Serialize)]
struct ArtifactRef<'a> {
    version: u32,
    pipeline: &'a TrainedPipeline,
}

#[derive(Deserialize)]
struct Artifact {
    version: u32,
    pipeline: TrainedPipeline,
}

/// Handle on the trainable classifier and its artifact on disk.
pub struct SentimentModel {
    artifact_path: PathBuf,
    pipeline: RwLock<Option<Arc<TrainedPipeline>>>,
    training: Mutex<()>,
}

impl SentimentModel {
    /// Create a handle. Touches neither the disk nor the model.
    pub fn new(artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            artifact_path: artifact_path.into(),
            pipeline: RwLock::new(None),
            training: Mutex::new(()),
        }
    }

    /// Handle on the default artifact location.
    pub fn with_default_path() -> Self {
        Self::new(PortablePathManager::default_model_path())
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// True when a model is held in memory. No disk access.
    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }

    /// True when an artifact exists on disk or a model is held in memory.
    pub fn is_ready(&self) -> bool {
        self.artifact_path.exists() || self.is_loaded()
    }

    /// Report of the model currently held in memory.
    pub fn report(&self) -> Option<TrainingReport> {
        self.snapshot().map(|p| p.report.clone())
    }

    fn snapshot(&self) -> Option<Arc<TrainedPipeline>> {
        // The slot only ever holds a complete pipeline, so a poisoned lock is still usable.
        self.pipeline
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn install(&self, pipeline: TrainedPipeline) {
        let mut slot = self.pipeline.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::new(pipeline));
    }

    fn training_guard(&self) -> MutexGuard<'_, ()> {
        self.training.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Train in memory without persisting. The previous model stays active on error.
    pub fn fit(&self, examples: &[TrainingExample]) -> Result<TrainingReport> {
        let _guard = self.training_guard();
        self.fit_locked(examples)
    }

    fn fit_locked(&self, examples: &[TrainingExample]) -> Result<TrainingReport> {
        info!("Training sentiment model on {} examples", examples.len());
        let pipeline = TrainedPipeline::fit(examples)?;
        let report = pipeline.report.clone();
        self.install(pipeline);
        Ok(report)
    }

    /// Full retrain: fit, persist, swap in. The previous model stays active on error.
    pub fn train(&self, examples: &[TrainingExample]) -> Result<TrainingReport> {
        let _guard = self.training_guard();
        self.train_locked(examples)
    }

    /// Train on the bundled corpus.
    pub fn train_default(&self) -> Result<TrainingReport> {
        self.train(&default_corpus())
    }

    fn train_locked(&self, examples: &[TrainingExample]) -> Result<TrainingReport> {
        info!("Training sentiment model on {} examples", examples.len());
        let pipeline = TrainedPipeline::fit(examples)?;
        // Only a model that reached disk replaces the active one.
        self.write_artifact(&pipeline)?;
        let report = pipeline.report.clone();
        self.install(pipeline);
        Ok(report)
    }

    /// Write the in-memory model to the artifact path, replacing any previous file.
    pub fn persist(&self) -> Result<()> {
        let _guard = self.training_guard();
        let pipeline = self.snapshot().ok_or_else(|| {
            SentimentError::ModelUnavailable("no trained model in memory".to_string())
        })?;
        self.write_artifact(&pipeline)
    }

    fn write_artifact(&self, pipeline: &TrainedPipeline) -> Result<()> {
        PortablePathManager::ensure_parent_dir(&self.artifact_path)?;

        // Write next to the target and rename so readers never see a partial file.
        let tmp_path = self.artifact_path.with_extension("tmp");
        let written = Self::write_tmp(&tmp_path, pipeline).and_then(|()| {
            fs::rename(&tmp_path, &self.artifact_path)?;
            Ok(())
        });
        if let Err(e) = written {
            if tmp_path.exists() {
                if let Err(cleanup) = fs::remove_file(&tmp_path) {
                    warn!("Failed to remove {:?}: {}", tmp_path, cleanup);
                }
            }
            return Err(e);
        }

        info!("Model saved to {:?}", self.artifact_path);
        Ok(())
    }

    fn write_tmp(tmp_path: &Path, pipeline: &TrainedPipeline) -> Result<()> {
        let file = fs::File::create(tmp_path)?;
        let mut writer = BufWriter::new(file);
        let artifact = ArtifactRef {
            version: ARTIFACT_FORMAT_VERSION,
            pipeline,
        };
        bincode::serialize_into(&mut writer, &artifact)?;
        writer.flush()?;
        Ok(())
    }

    /// Read the artifact into memory, or train on the default corpus when none exists.
    pub fn load(&self) -> Result<()> {
        let _guard = self.training_guard();
        self.load_locked()
    }

    fn load_locked(&self) -> Result<()> {
        if !self.artifact_path.exists() {
            info!("No saved model found, training new model...");
            return self
                .train_locked(&default_corpus())
                .map(|_| ())
                .map_err(|e| SentimentError::ModelUnavailable(format!("training failed: {}", e)));
        }

        let bytes = fs::read(&self.artifact_path)?;
        let artifact: Artifact = bincode::deserialize(&bytes)?;
        if artifact.version != ARTIFACT_FORMAT_VERSION {
            return Err(SentimentError::Artifact(format!(
                "unsupported artifact version {} (expected {})",
                artifact.version, ARTIFACT_FORMAT_VERSION
            )));
        }
        artifact
            .pipeline
            .check_consistency()
            .map_err(|e| SentimentError::Artifact(e.to_string()))?;

        self.install(artifact.pipeline);
        info!("Model loaded from {:?}", self.artifact_path);
        Ok(())
    }

    /// Current model, loading or training it on first use.
    fn ensure_loaded(&self) -> Result<Arc<TrainedPipeline>> {
        if let Some(pipeline) = self.snapshot() {
            return Ok(pipeline);
        }

        let _guard = self.training_guard();
        // Another caller may have loaded while we waited.
        if self.snapshot().is_none() {
            self.load_locked()?;
        }
        self.snapshot().ok_or_else(|| {
            SentimentError::ModelUnavailable("model missing after load".to_string())
        })
    }

    /// Prediction that reports an unavailable model but absorbs inference failures.
    pub fn predict_checked(&self, text: &str) -> Result<SentimentLabel> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(SentimentLabel::Neutral);
        }

        let pipeline = self.ensure_loaded()?;
        match pipeline.predict(text) {
            Ok(label) => {
                debug!("Model predicted {}", label);
                Ok(label)
            }
            Err(e) => {
                warn!("Model prediction failed: {}; returning neutral", e);
                Ok(SentimentLabel::Neutral)
            }
        }
    }

    /// Distribution that reports an unavailable model but absorbs inference failures.
    pub fn predict_distribution_checked(&self, text: &str) -> Result<SentimentDistribution> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(SentimentDistribution::DEFAULT);
        }

        let pipeline = self.ensure_loaded()?;
        match pipeline.predict_proba(text) {
            Ok(dist) => Ok(dist),
            Err(e) => {
                warn!("Model probability estimate failed: {}; returning default", e);
                Ok(SentimentDistribution::DEFAULT)
            }
        }
    }

    /// Label and distribution scored against the same model snapshot.
    pub fn predict_detailed_checked(
        &self,
        text: &str,
    ) -> Result<(SentimentLabel, SentimentDistribution)> {
        let text = text.trim();
        if text.is_empty() {
            return Ok((SentimentLabel::Neutral, SentimentDistribution::DEFAULT));
        }

        let pipeline = self.ensure_loaded()?;
        let label = pipeline.predict(text).unwrap_or_else(|e| {
            warn!("Model prediction failed: {}; returning neutral", e);
            SentimentLabel::Neutral
        });
        let dist = pipeline.predict_proba(text).unwrap_or_else(|e| {
            warn!("Model probability estimate failed: {}; returning default", e);
            SentimentDistribution::DEFAULT
        });
        Ok((label, dist))
    }

    /// Predicted label. Never fails: any problem yields `neutral`.
    pub fn predict(&self, text: &str) -> SentimentLabel {
        self.predict_checked(text).unwrap_or_else(|e| {
            warn!("Sentiment model unavailable: {}; returning neutral", e);
            SentimentLabel::Neutral
        })
    }

    /// Class probabilities. Never fails: any problem yields the default distribution.
    pub fn predict_distribution(&self, text: &str) -> SentimentDistribution {
        self.predict_distribution_checked(text).unwrap_or_else(|e| {
            warn!("Sentiment model unavailable: {}; returning default distribution", e);
            SentimentDistribution::DEFAULT
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small_corpus() -> Vec<TrainingExample> {
        vec![
            TrainingExample::new("отличный товар доволен", SentimentLabel::Positive),
            TrainingExample::new("отличный сервис доволен", SentimentLabel::Positive),
            TrainingExample::new("ужасный товар разочарован", SentimentLabel::Negative),
            TrainingExample::new("ужасный сервис разочарован", SentimentLabel::Negative),
        ]
    }

    #[test]
    fn test_new_handle_is_not_loaded() {
        let dir = tempdir().unwrap();
        let model = SentimentModel::new(dir.path().join("model.bin"));
        assert!(!model.is_loaded());
        assert!(!model.is_ready());
        assert!(model.report().is_none());
    }

    #[test]
    fn test_fit_keeps_disk_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let model = SentimentModel::new(&path);

        let report = model.fit(&small_corpus()).unwrap();

        assert!(model.is_loaded());
        assert!(!path.exists());
        assert_eq!(report.total_examples, 4);
        assert_eq!(report.train_size + report.eval_size, 4);
        assert_eq!(report.classes.len(), 2);
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let dir = tempdir().unwrap();
        let model = SentimentModel::new(dir.path().join("model.bin"));
        let err = model.train(&[]).unwrap_err();
        assert!(matches!(err, SentimentError::TrainingData(_)));
        assert!(!model.is_ready());
    }

    #[test]
    fn test_single_label_rejected_and_previous_model_kept() {
        let dir = tempdir().unwrap();
        let model = SentimentModel::new(dir.path().join("model.bin"));
        model.fit(&small_corpus()).unwrap();
        let before = model.report();

        let single = vec![
            TrainingExample::new("хорошо", SentimentLabel::Positive),
            TrainingExample::new("прекрасно", SentimentLabel::Positive),
        ];
        let err = model.fit(&single).unwrap_err();

        assert!(matches!(err, SentimentError::TrainingData(_)));
        assert_eq!(model.report(), before);
    }

    #[test]
    fn test_train_persists_artifact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("model.bin");
        let model = SentimentModel::new(&path);

        model.train(&small_corpus()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_failed_save_keeps_previous_model() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("models");
        let model = SentimentModel::new(blocker.join("model.bin"));
        model.fit(&small_corpus()).unwrap();

        // The parent "directory" is a regular file, so the artifact cannot be written.
        fs::write(&blocker, b"").unwrap();
        assert!(model.train(&default_corpus()).is_err());

        assert_eq!(model.report().unwrap().total_examples, small_corpus().len());
        assert_eq!(model.predict("отличный доволен"), SentimentLabel::Positive);
    }

    #[test]
    fn test_failed_load_installs_nothing() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("models");
        fs::write(&blocker, b"").unwrap();
        let model = SentimentModel::new(blocker.join("model.bin"));

        assert!(matches!(model.load(), Err(SentimentError::ModelUnavailable(_))));
        assert!(!model.is_loaded());
        assert!(model.report().is_none());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        // A non-empty directory sits where the artifact should go.
        let path = dir.path().join("model.bin");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), b"").unwrap();

        let model = SentimentModel::new(&path);
        assert!(model.train(&small_corpus()).is_err());

        assert!(!path.with_extension("tmp").exists());
        assert!(!model.is_loaded());
    }

    #[test]
    fn test_persist_without_model_fails() {
        let dir = tempdir().unwrap();
        let model = SentimentModel::new(dir.path().join("model.bin"));
        assert!(matches!(
            model.persist(),
            Err(SentimentError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_predict_on_small_corpus() {
        let dir = tempdir().unwrap();
        let model = SentimentModel::new(dir.path().join("model.bin"));
        model.fit(&small_corpus()).unwrap();

        assert_eq!(model.predict("отличный доволен"), SentimentLabel::Positive);
        assert_eq!(model.predict("ужасный разочарован"), SentimentLabel::Negative);
    }

    #[test]
    fn test_empty_text_skips_model() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let model = SentimentModel::new(&path);

        assert_eq!(model.predict("   "), SentimentLabel::Neutral);
        assert_eq!(model.predict_distribution(""), SentimentDistribution::DEFAULT);
        // Nothing was loaded or trained for blank input.
        assert!(!model.is_loaded());
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_artifact_is_reported_by_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");
        fs::write(&path, b"definitely not a model").unwrap();

        let model = SentimentModel::new(&path);
        assert!(model.load().is_err());
        assert!(!model.is_loaded());
        // The inference surface still answers.
        assert_eq!(model.predict("отлично"), SentimentLabel::Neutral);
        assert_eq!(model.predict_distribution("отлично"), SentimentDistribution::DEFAULT);
    }

    #[test]
    fn test_inconsistent_pipeline_degrades_to_neutral() {
        let dir = tempdir().unwrap();
        let model = SentimentModel::new(dir.path().join("model.bin"));
        model.fit(&small_corpus()).unwrap();

        // Swap in a pipeline whose classifier no longer matches the vectorizer.
        let mut broken = (*model.snapshot().unwrap()).clone();
        broken.vectorizer = TfidfVectorizer::default();
        model.install(broken);

        assert_eq!(model.predict_checked("отличный").unwrap(), SentimentLabel::Neutral);
        assert_eq!(
            model.predict_distribution_checked("отличный").unwrap(),
            SentimentDistribution::DEFAULT
        );
    }
}
