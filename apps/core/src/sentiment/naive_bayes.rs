//! Multinomial Naive Bayes over TF-IDF rows.

use serde::{Deserialize, Serialize};

use super::label::{SentimentDistribution, SentimentLabel};
use super::vectorizer::SparseVector;
use crate::error::{Result, SentimentError};

/// Additive (Laplace) smoothing used by the engine
pub const DEFAULT_ALPHA: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f64,
    /// Classes seen during fit, in `SentimentLabel::ALL` order
    classes: Vec<SentimentLabel>,
    class_log_prior: Vec<f64>,
    /// log P(feature | class), one row per class
    feature_log_prob: Vec<Vec<f64>>,
    n_features: usize,
}

impl Default for MultinomialNb {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

impl MultinomialNb {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            classes: Vec::new(),
            class_log_prior: Vec::new(),
            feature_log_prob: Vec::new(),
            n_features: 0,
        }
    }

    pub fn classes(&self) -> &[SentimentLabel] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Fit on vectorized rows. Needs at least two distinct labels.
    pub fn fit(
        &mut self,
        rows: &[SparseVector],
        labels: &[SentimentLabel],
        n_features: usize,
    ) -> Result<()> {
        if rows.len() != labels.len() {
            return Err(SentimentError::TrainingData(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }

        let mut classes: Vec<SentimentLabel> = labels.to_vec();
        classes.sort();
        classes.dedup();
        if classes.len() < 2 {
            return Err(SentimentError::TrainingData(format!(
                "need at least two distinct labels, got {}",
                classes.len()
            )));
        }

        let mut class_count = vec![0.0f64; classes.len()];
        let mut feature_count = vec![vec![0.0f64; n_features]; classes.len()];

        for (row, label) in rows.iter().zip(labels) {
            // Every label is in `classes` by construction.
            let c = classes.iter().position(|l| l == label).unwrap_or(0);
            class_count[c] += 1.0;
            for &(idx, value) in row {
                if idx >= n_features {
                    return Err(SentimentError::TrainingData(format!(
                        "feature index {} out of range {}",
                        idx, n_features
                    )));
                }
                feature_count[c][idx] += value;
            }
        }

        let total: f64 = class_count.iter().sum();
        self.class_log_prior = class_count.iter().map(|n| (n / total).ln()).collect();

        self.feature_log_prob = feature_count
            .into_iter()
            .map(|counts| {
                let denom: f64 = counts.iter().sum::<f64>() + self.alpha * n_features as f64;
                counts
                    .into_iter()
                    .map(|c| ((c + self.alpha) / denom).ln())
                    .collect()
            })
            .collect();

        self.classes = classes;
        self.n_features = n_features;
        Ok(())
    }

    fn joint_log_likelihood(&self, row: &SparseVector) -> Result<Vec<f64>> {
        if self.classes.is_empty() {
            return Err(SentimentError::Inference("classifier is not fitted".to_string()));
        }
        if self.feature_log_prob.len() != self.classes.len()
            || self.class_log_prior.len() != self.classes.len()
        {
            return Err(SentimentError::Inference("inconsistent classifier state".to_string()));
        }

        self.classes
            .iter()
            .enumerate()
            .map(|(c, _)| {
                let log_probs = &self.feature_log_prob[c];
                let mut score = self.class_log_prior[c];
                for &(idx, value) in row {
                    let lp = log_probs.get(idx).ok_or_else(|| {
                        SentimentError::Inference(format!("feature index {} out of range", idx))
                    })?;
                    score += value * lp;
                }
                Ok(score)
            })
            .collect()
    }

    /// Most likely class. Ties resolve in `SentimentLabel::ALL` order.
    pub fn predict(&self, row: &SparseVector) -> Result<SentimentLabel> {
        let jll = self.joint_log_likelihood(row)?;
        let mut best = 0;
        for (i, score) in jll.iter().enumerate() {
            if *score > jll[best] {
                best = i;
            }
        }
        Ok(self.classes[best])
    }

    /// Posterior per label. Labels never seen in training get 0.0.
    pub fn predict_proba(&self, row: &SparseVector) -> Result<SentimentDistribution> {
        let jll = self.joint_log_likelihood(row)?;
        let max = jll.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return Err(SentimentError::Inference("non-finite log likelihood".to_string()));
        }
        let sum_exp: f64 = jll.iter().map(|s| (s - max).exp()).sum();

        let mut dist = SentimentDistribution {
            positive: 0.0,
            negative: 0.0,
            neutral: 0.0,
        };
        for (label, score) in self.classes.iter().zip(&jll) {
            dist.set(*label, (score - max).exp() / sum_exp);
        }
        Ok(dist)
    }
}
