//! Test Module
//!
//! Cross-module test suite for the sentiment engine.
//!
//! ## Test Categories
//! - `analyzer_tests`: orchestrator behavior in both modes, fallback and retrain
//! - `model_tests`: statistical classifier on the bundled corpus
//! - `persistence_tests`: artifact round-trips and reproducibility
//! - `concurrency_tests`: predictions racing a retrain

pub mod model_tests;
