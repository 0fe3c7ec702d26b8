//! Detector configuration: dataset location, feature extraction, model training, web server, logging.

use crate::error::{DetectorError, Result};
use crate::model::Loss;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Labeled training CSV
    pub dataset: DatasetConfig,
    /// TF-IDF vectorizer parameters
    pub features: FeaturesConfig,
    /// Linear classifier training parameters
    pub model: ModelConfig,
    /// HTTP listener and threshold defaults
    pub server: ServerConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
    /// Column holding the query / payload text
    pub text_column: String,
    /// Column holding the 0/1 label (1 = SQL injection)
    pub label_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Smallest n-gram length (in tokens)
    pub ngram_min: usize,
    /// Largest n-gram length (in tokens)
    pub ngram_max: usize,
    /// Vocabulary cap; most frequent n-grams are kept
    pub max_features: usize,
    /// Use 1 + ln(tf) instead of raw counts
    pub sublinear_tf: bool,
    pub lowercase: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub loss: Loss,
    /// Inverse regularization strength (larger = weaker L2 penalty)
    pub c: f64,
    pub max_iter: usize,
    /// Stop once the gradient norm drops below this
    pub tolerance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Used when the form or API omits a threshold or sends garbage
    pub default_threshold: f64,
    /// Form slider lower bound; submitted values are clamped into [min, max]
    pub min_threshold: f64,
    pub max_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("SQL_Dataset.csv"),
            text_column: "Query".to_string(),
            label_column: "Label".to_string(),
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            ngram_min: 1,
            ngram_max: 2,
            max_features: 20_000,
            sublinear_tf: true,
            lowercase: true,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            loss: Loss::Logistic,
            c: 10.0,
            max_iter: 1000,
            tolerance: 1e-6,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            default_threshold: 0.80,
            min_threshold: 0.50,
            max_threshold: 0.99,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl DetectorConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<DetectorConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        self.features.validate()?;
        self.model.validate()?;
        self.server.validate()
    }
}

impl FeaturesConfig {
    pub fn validate(&self) -> Result<()> {
        if self.ngram_min == 0 || self.ngram_min > self.ngram_max {
            return Err(DetectorError::config(format!(
                "invalid n-gram range {}..={}",
                self.ngram_min, self.ngram_max
            )));
        }
        if self.max_features == 0 {
            return Err(DetectorError::config("max_features must be positive"));
        }
        Ok(())
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(DetectorError::config(format!("c must be positive, got {}", self.c)));
        }
        if self.max_iter == 0 {
            return Err(DetectorError::config("max_iter must be positive"));
        }
        if !(self.tolerance >= 0.0) {
            return Err(DetectorError::config("tolerance must be non-negative"));
        }
        Ok(())
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.min_threshold)
            || !in_unit(self.max_threshold)
            || self.min_threshold > self.max_threshold
        {
            return Err(DetectorError::config(format!(
                "invalid threshold range [{}, {}]",
                self.min_threshold, self.max_threshold
            )));
        }
        if !(self.min_threshold..=self.max_threshold).contains(&self.default_threshold) {
            return Err(DetectorError::config(format!(
                "default threshold {} outside [{}, {}]",
                self.default_threshold, self.min_threshold, self.max_threshold
            )));
        }
        Ok(())
    }
}
