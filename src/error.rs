//! Error taxonomy for training, lifecycle, and threshold handling.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectorError {
    /// Corpus empty, single-class, malformed, or without extractable tokens.
    #[error("training data error: {0}")]
    TrainingData(String),

    #[error("detector is not trained yet")]
    NotReady,

    #[error("detector is already trained")]
    AlreadyTrained,

    #[error("threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("dataset error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DetectorError {
    pub fn training_data(msg: impl Into<String>) -> Self {
        Self::TrainingData(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DetectorError>;
