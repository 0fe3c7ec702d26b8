//! Turns a probability and a caller-supplied threshold into a label.

use crate::error::{DetectorError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "SQL Injection")]
    SqlInjection,
    #[serde(rename = "Benign")]
    Benign,
}

impl Label {
    /// Inclusive: a probability equal to the threshold is an injection.
    pub fn from_probability(probability: f64, threshold: Threshold) -> Self {
        if probability >= threshold.value() {
            Label::SqlInjection
        } else {
            Label::Benign
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::SqlInjection => "SQL Injection",
            Label::Benign => "Benign",
        }
    }

    pub fn is_injection(self) -> bool {
        self == Label::SqlInjection
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision threshold in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Threshold(f64);

impl Threshold {
    /// Rejects NaN and values outside [0, 1].
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DetectorError::InvalidThreshold(value))
        }
    }

    /// Clamps into [min, max] (itself within [0, 1]); NaN falls back to `fallback`.
    pub fn clamped(value: f64, min: f64, max: f64, fallback: f64) -> Self {
        let lo = if min.is_nan() { 0.0 } else { min.clamp(0.0, 1.0) };
        let hi = if max.is_nan() { 1.0 } else { max.clamp(lo, 1.0) };
        let v = if value.is_nan() { fallback } else { value };
        if v.is_nan() {
            return Self(lo);
        }
        Self(v.clamp(lo, hi))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

pub fn decide(probability: f64, threshold: Threshold) -> Label {
    Label::from_probability(probability, threshold)
}

/// Result of classifying a single payload.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub id: Uuid,
    pub label: Label,
    pub probability: f64,
    pub threshold: Threshold,
    /// Unix millis
    pub ts: i64,
}

impl Detection {
    pub fn new(probability: f64, threshold: Threshold) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: decide(probability, threshold),
            probability,
            threshold,
            ts: Utc::now().timestamp_millis(),
        }
    }
}
