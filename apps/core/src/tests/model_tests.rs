//! Statistical classifier tests on the bundled corpus.

use crate::sentiment::{default_corpus, SentimentLabel, SentimentModel};
use tempfile::tempdir;

const SAMPLE_TEXTS: &[&str] = &[
    "Отличный товар, доволен, рекомендую",
    "Разочарован, сломанный товар, деньги не вернули",
    "Обычный товар, ничего особенного",
    "Курьер приехал вовремя",
    "Совершенно незнакомые слова здесь",
    "ok",
    "!!!",
    "Я",
];

fn trained_model() -> (tempfile::TempDir, SentimentModel) {
    let dir = tempdir().expect("Failed to create temp dir");
    let model = SentimentModel::new(dir.path().join("model.bin"));
    model.fit(&default_corpus()).expect("Failed to fit default corpus");
    (dir, model)
}

#[cfg(test)]
mod prediction_tests {
    use super::*;

    #[test]
    fn test_positive_review_resembling_training_example() {
        let (_dir, model) = trained_model();

        let text = "Отличный товар, доволен, рекомендую";
        assert_eq!(model.predict(text), SentimentLabel::Positive);

        let dist = model.predict_distribution(text);
        assert_eq!(dist.top(), SentimentLabel::Positive);
        assert!(dist.positive > dist.negative);
        assert!(dist.positive > dist.neutral);
    }

    #[test]
    fn test_negative_review() {
        let (_dir, model) = trained_model();
        assert_eq!(
            model.predict("Разочарован, сломанный товар, деньги не вернули"),
            SentimentLabel::Negative
        );
    }

    #[test]
    fn test_label_matches_distribution_top() {
        let (_dir, model) = trained_model();
        for text in SAMPLE_TEXTS {
            let (label, dist) = model.predict_detailed_checked(text).unwrap();
            assert_eq!(label, dist.top(), "label/top mismatch for '{}'", text);
        }
    }
}

#[cfg(test)]
mod distribution_tests {
    use super::*;

    #[test]
    fn test_distribution_sums_to_one() {
        let (_dir, model) = trained_model();

        for text in SAMPLE_TEXTS {
            let dist = model.predict_distribution(text);
            assert!(
                (dist.sum() - 1.0).abs() < 1e-6,
                "distribution for '{}' sums to {}",
                text,
                dist.sum()
            );
            for (label, p) in dist.iter() {
                assert!((0.0..=1.0).contains(&p), "{} = {} for '{}'", label, p, text);
            }
        }
    }

    #[test]
    fn test_out_of_vocabulary_text_uses_priors() {
        let (_dir, model) = trained_model();

        // Balanced corpus, so the priors are equal for all three labels.
        let dist = model.predict_distribution("Совершенно незнакомые слова здесь");
        for (_, p) in dist.iter() {
            assert!((p - 1.0 / 3.0).abs() < 1e-9);
        }
    }
}

#[cfg(test)]
mod report_tests {
    use super::*;

    #[test]
    fn test_report_on_default_corpus() {
        let (_dir, model) = trained_model();
        let report = model.report().expect("report after fit");

        assert_eq!(report.total_examples, 60);
        assert_eq!(report.eval_size, 12);
        assert_eq!(report.train_size, 48);
        assert_eq!(report.eval_indices.len(), 12);
        assert_eq!(report.classes.len(), 3);
        assert!(report.vocabulary_size > 0 && report.vocabulary_size <= 1000);

        let accuracy = report.accuracy.expect("accuracy on non-empty eval split");
        assert!((0.0..=1.0).contains(&accuracy));
    }

    #[test]
    fn test_is_ready_tracks_memory_and_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let model = SentimentModel::new(&path);
        assert!(!model.is_ready());

        model.fit(&default_corpus()).unwrap();
        assert!(model.is_ready());
        assert!(!path.exists());

        model.persist().unwrap();
        let fresh = SentimentModel::new(&path);
        assert!(fresh.is_ready());
        assert!(!fresh.is_loaded());
    }

    #[test]
    fn test_predict_loads_lazily() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lazy").join("model.bin");
        let model = SentimentModel::new(&path);

        // No artifact: the first real prediction trains and persists.
        let label = model.predict("Отличный товар, доволен, рекомендую");

        assert!(SentimentLabel::ALL.contains(&label));
        assert!(model.is_loaded());
        assert!(path.exists());
    }
}
