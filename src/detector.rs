//! Fitted detection pipeline (vectorizer + classifier) and its one-time publication.
//!
//! A [`Detector`] is immutable once built and is shared by reference across request handlers.
//! [`DetectorCell`] is the Untrained → Ready state machine: it is fitted exactly once and
//! publishes the detector atomically, so readers never observe a partially built model.

use crate::config::{FeaturesConfig, ModelConfig};
use crate::dataset::TrainingCorpus;
use crate::error::{DetectorError, Result};
use crate::features::{FeatureVector, TfidfVectorizer};
use crate::model::{LinearClassifier, Loss, Trainer};
use crate::verdict::{Detection, Threshold};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub rows: usize,
    pub positives: usize,
    pub negatives: usize,
    pub vocabulary_size: usize,
    pub loss: Loss,
    pub iterations: usize,
    pub converged: bool,
    pub final_loss: f64,
    pub corpus_sha256: String,
    pub trained_at: DateTime<Utc>,
}

pub struct Detector {
    vectorizer: TfidfVectorizer,
    classifier: LinearClassifier,
    report: TrainingReport,
}

impl Detector {
    pub fn fit(
        corpus: &TrainingCorpus,
        features: &FeaturesConfig,
        model: &ModelConfig,
    ) -> Result<Self> {
        if corpus.is_empty() {
            return Err(DetectorError::training_data("corpus is empty"));
        }

        let vectorizer = TfidfVectorizer::fit(corpus.texts(), features)?;
        info!(
            rows = corpus.len(),
            vocabulary_size = vectorizer.dim(),
            "vectorizer fitted"
        );

        let vectors = vectorizer.transform_batch(corpus.texts());
        let labels = corpus.labels();
        let (classifier, summary) =
            Trainer::new(model.clone()).fit(&vectors, &labels, vectorizer.dim())?;
        info!(
            iterations = summary.iterations,
            converged = summary.converged,
            final_loss = summary.final_loss,
            "classifier fitted"
        );

        let report = TrainingReport {
            rows: corpus.len(),
            positives: corpus.positives(),
            negatives: corpus.negatives(),
            vocabulary_size: vectorizer.dim(),
            loss: classifier.loss(),
            iterations: summary.iterations,
            converged: summary.converged,
            final_loss: summary.final_loss,
            corpus_sha256: corpus.digest(),
            trained_at: Utc::now(),
        };

        Ok(Self {
            vectorizer,
            classifier,
            report,
        })
    }

    pub fn transform(&self, text: &str) -> FeatureVector {
        self.vectorizer.transform(text)
    }

    pub fn predict_probability(&self, text: &str) -> f64 {
        self.classifier.predict_probability(&self.transform(text))
    }

    /// Transform → probability → inclusive threshold comparison.
    pub fn predict_label(&self, text: &str, threshold: f64) -> Result<Detection> {
        let threshold = Threshold::new(threshold)?;
        Ok(self.detect(text, threshold))
    }

    pub fn detect(&self, text: &str, threshold: Threshold) -> Detection {
        let probability = self.predict_probability(text);
        let detection = Detection::new(probability, threshold);
        debug!(
            label = %detection.label,
            probability,
            threshold = threshold.value(),
            "payload classified"
        );
        detection
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &LinearClassifier {
        &self.classifier
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }
}

#[derive(Default)]
pub struct DetectorCell {
    inner: OnceLock<Arc<Detector>>,
}

impl DetectorCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fits and publishes the detector. The corpus is dropped once training finishes.
    /// A second call (or a concurrent loser) fails with [`DetectorError::AlreadyTrained`].
    pub fn fit(
        &self,
        corpus: TrainingCorpus,
        features: &FeaturesConfig,
        model: &ModelConfig,
    ) -> Result<Arc<Detector>> {
        if self.inner.get().is_some() {
            return Err(DetectorError::AlreadyTrained);
        }
        let detector = Arc::new(Detector::fit(&corpus, features, model)?);
        drop(corpus);
        self.inner
            .set(Arc::clone(&detector))
            .map_err(|_| DetectorError::AlreadyTrained)?;
        Ok(detector)
    }

    pub fn is_ready(&self) -> bool {
        self.inner.get().is_some()
    }

    pub fn get(&self) -> Result<&Arc<Detector>> {
        self.inner.get().ok_or(DetectorError::NotReady)
    }

    pub fn transform(&self, text: &str) -> Result<FeatureVector> {
        Ok(self.get()?.transform(text))
    }

    pub fn predict_probability(&self, text: &str) -> Result<f64> {
        Ok(self.get()?.predict_probability(text))
    }

    pub fn predict_label(&self, text: &str, threshold: f64) -> Result<Detection> {
        self.get()?.predict_label(text, threshold)
    }
}

impl From<Detector> for DetectorCell {
    fn from(detector: Detector) -> Self {
        let cell = Self::new();
        let _ = cell.inner.set(Arc::new(detector));
        cell
    }
}
