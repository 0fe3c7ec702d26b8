//! Labeled training corpus and its CSV loader.

mod loader;

pub use loader::load_csv;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One labeled query; `injection` is the positive class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub text: String,
    pub injection: bool,
}

impl Sample {
    pub fn new(text: impl Into<String>, injection: bool) -> Self {
        Self {
            text: text.into(),
            injection,
        }
    }
}

/// Ordered, immutable collection of samples. Only needed until the detector is fitted.
#[derive(Debug, Clone, Default)]
pub struct TrainingCorpus {
    samples: Vec<Sample>,
}

impl TrainingCorpus {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn positives(&self) -> usize {
        self.samples.iter().filter(|s| s.injection).count()
    }

    pub fn negatives(&self) -> usize {
        self.len() - self.positives()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(|s| s.text.as_str())
    }

    pub fn labels(&self) -> Vec<bool> {
        self.samples.iter().map(|s| s.injection).collect()
    }

    /// SHA-256 over every (text, label) pair in order, hex encoded.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for s in &self.samples {
            hasher.update((s.text.len() as u64).to_le_bytes());
            hasher.update(s.text.as_bytes());
            hasher.update([u8::from(s.injection)]);
        }
        format!("{:x}", hasher.finalize())
    }
}

impl FromIterator<Sample> for TrainingCorpus {
    fn from_iter<T: IntoIterator<Item = Sample>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for TrainingCorpus {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        iter.into_iter().map(|(t, y)| Sample::new(t, y)).collect()
    }
}
