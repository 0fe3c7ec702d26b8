//! Linear binary classifier over sparse TF-IDF vectors. The loss is fixed at construction and
//! determines how a raw decision score maps to a probability of the positive class.

use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Loss {
    /// Log loss; probability = sigmoid(score)
    #[default]
    Logistic,
    /// Smoothed hinge loss; probability = (clip(score, -1, 1) + 1) / 2
    ModifiedHuber,
}

impl Loss {
    /// Loss for one sample with decision score `z`.
    pub fn value(self, z: f64, positive: bool) -> f64 {
        match self {
            Loss::Logistic => {
                // ln(1 + e^-m) with m = y·z, written to avoid overflow
                let m = if positive { z } else { -z };
                if m > 0.0 {
                    (-m).exp().ln_1p()
                } else {
                    -m + m.exp().ln_1p()
                }
            }
            Loss::ModifiedHuber => {
                let m = if positive { z } else { -z };
                if m >= 1.0 {
                    0.0
                } else if m >= -1.0 {
                    (1.0 - m) * (1.0 - m)
                } else {
                    -4.0 * m
                }
            }
        }
    }

    /// d(loss)/dz
    pub fn derivative(self, z: f64, positive: bool) -> f64 {
        match self {
            Loss::Logistic => sigmoid(z) - if positive { 1.0 } else { 0.0 },
            Loss::ModifiedHuber => {
                let y = if positive { 1.0 } else { -1.0 };
                let m = y * z;
                if m >= 1.0 {
                    0.0
                } else if m >= -1.0 {
                    -2.0 * y * (1.0 - m)
                } else {
                    -4.0 * y
                }
            }
        }
    }

    /// Upper bound on d²(loss)/dz², used to size the gradient step.
    pub fn curvature_bound(self) -> f64 {
        match self {
            Loss::Logistic => 0.25,
            Loss::ModifiedHuber => 2.0,
        }
    }

    pub fn probability(self, z: f64) -> f64 {
        match self {
            Loss::Logistic => sigmoid(z),
            Loss::ModifiedHuber => (z.clamp(-1.0, 1.0) + 1.0) / 2.0,
        }
    }
}

pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    weights: Vec<f64>,
    bias: f64,
    loss: Loss,
}

impl LinearClassifier {
    pub fn new(weights: Vec<f64>, bias: f64, loss: Loss) -> Self {
        Self {
            weights,
            bias,
            loss,
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn loss(&self) -> Loss {
        self.loss
    }

    pub fn dim(&self) -> usize {
        self.weights.len()
    }

    pub fn decision_function(&self, features: &FeatureVector) -> f64 {
        features.dot(&self.weights) + self.bias
    }

    /// Probability of the positive class; always in [0, 1].
    pub fn predict_probability(&self, features: &FeatureVector) -> f64 {
        self.loss.probability(self.decision_function(features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_bounded_and_symmetric() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(40.0) > 0.999_999);
        assert!(sigmoid(-40.0) < 1e-6);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(800.0) <= 1.0);
        assert!((sigmoid(2.5) + sigmoid(-2.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn logistic_loss_matches_derivative_sign() {
        let l = Loss::Logistic;
        assert!((l.value(0.0, true) - std::f64::consts::LN_2).abs() < 1e-12);
        assert!(l.derivative(0.0, true) < 0.0);
        assert!(l.derivative(0.0, false) > 0.0);
        assert!(l.value(-1000.0, true).is_finite());
    }

    #[test]
    fn modified_huber_regions() {
        let l = Loss::ModifiedHuber;
        assert_eq!(l.value(2.0, true), 0.0);
        assert_eq!(l.value(0.0, true), 1.0);
        assert_eq!(l.value(-3.0, true), 12.0);
        assert_eq!(l.derivative(2.0, true), 0.0);
        assert_eq!(l.derivative(-3.0, true), -4.0);
        assert_eq!(l.probability(5.0), 1.0);
        assert_eq!(l.probability(-5.0), 0.0);
        assert_eq!(l.probability(0.0), 0.5);
    }

    #[test]
    fn zero_vector_scores_bias_only() {
        let clf = LinearClassifier::new(vec![3.0, -2.0], 0.4, Loss::Logistic);
        let p = clf.predict_probability(&FeatureVector::zeros(2));
        assert_eq!(p, sigmoid(0.4));
    }
}
