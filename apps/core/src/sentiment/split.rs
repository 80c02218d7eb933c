//! Seeded, stratified train/eval partitioning.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

use super::label::SentimentLabel;

/// Share of each label held out for evaluation
pub const EVAL_FRACTION: f64 = 0.2;
/// Seed for the shuffle, fixed so retrains are comparable
pub const SPLIT_SEED: u64 = 42;

/// Indices into the original corpus, each list sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub eval: Vec<usize>,
}

/// Partition `labels` so each label contributes about `eval_fraction` of its
/// examples to the eval side. Every label keeps at least one training example.
pub fn stratified_split(labels: &[SentimentLabel], eval_fraction: f64, seed: u64) -> Split {
    let mut by_label: BTreeMap<&'static str, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        by_label.entry(label.as_str()).or_default().push(idx);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(labels.len());
    let mut eval = Vec::new();

    for (_, mut indices) in by_label {
        indices.shuffle(&mut rng);
        let n = indices.len();
        let n_eval = ((n as f64) * eval_fraction).round() as usize;
        let n_eval = n_eval.min(n.saturating_sub(1));

        eval.extend_from_slice(&indices[..n_eval]);
        train.extend_from_slice(&indices[n_eval..]);
    }

    train.sort_unstable();
    eval.sort_unstable();
    Split { train, eval }
}
