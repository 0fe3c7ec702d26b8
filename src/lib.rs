//! SQL injection payload detector.
//!
//! Modular structure:
//! - [`dataset`] — Labeled training corpus and CSV loading
//! - [`features`] — Word/bigram TF-IDF vectorizer
//! - [`model`] — Linear classifier and its trainer
//! - [`verdict`] — Threshold decision
//! - [`detector`] — Fitted pipeline and its one-time publication
//! - [`web`] — Single-page tester and JSON API
//! - [`logging`] — Structured JSON logging

pub mod config;
pub mod dataset;
pub mod detector;
pub mod error;
pub mod features;
pub mod logging;
pub mod model;
pub mod verdict;
pub mod web;

pub use config::DetectorConfig;
pub use dataset::{Sample, TrainingCorpus};
pub use detector::{Detector, DetectorCell, TrainingReport};
pub use error::DetectorError;
pub use features::{FeatureVector, TfidfVectorizer};
pub use logging::StructuredLogger;
pub use model::{LinearClassifier, Loss};
pub use verdict::{Detection, Label, Threshold};
