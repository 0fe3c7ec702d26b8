//! Full-batch Nesterov-accelerated gradient descent on mean loss + (λ/2)‖w‖², λ = 1 / (c·n).
//! The bias is not regularized. Deterministic for a fixed input order.

use super::{LinearClassifier, Loss};
use crate::config::ModelConfig;
use crate::error::{DetectorError, Result};
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub iterations: usize,
    pub converged: bool,
    /// Regularized objective at the returned parameters
    pub final_loss: f64,
    pub gradient_norm: f64,
}

pub struct Trainer {
    config: ModelConfig,
}

impl Trainer {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn fit(
        &self,
        samples: &[FeatureVector],
        labels: &[bool],
        dim: usize,
    ) -> Result<(LinearClassifier, TrainingSummary)> {
        self.config.validate()?;
        if samples.is_empty() {
            return Err(DetectorError::training_data("no training samples"));
        }
        if samples.len() != labels.len() {
            return Err(DetectorError::training_data(format!(
                "{} samples but {} labels",
                samples.len(),
                labels.len()
            )));
        }
        let positives = labels.iter().filter(|&&y| y).count();
        if positives == 0 || positives == labels.len() {
            return Err(DetectorError::training_data(
                "labels contain a single class; both benign and injection rows are required",
            ));
        }

        let loss = self.config.loss;
        let n = samples.len() as f64;
        let lambda = 1.0 / (self.config.c * n);
        let max_sq = samples
            .iter()
            .map(|x| x.squared_norm() + 1.0)
            .fold(1.0, f64::max);
        let step = 1.0 / (loss.curvature_bound() * max_sq + lambda);

        let mut w = vec![0.0; dim];
        let mut b = 0.0;
        // Lookahead point where the gradient is taken
        let mut vw = w.clone();
        let mut vb = b;
        let mut t_prev = 1.0f64;
        let mut grad_w = vec![0.0; dim];

        let mut iterations = 0;
        let mut converged = false;
        let mut gradient_norm = f64::INFINITY;

        while iterations < self.config.max_iter {
            let grad_b = gradient(loss, samples, labels, &vw, vb, lambda, &mut grad_w);
            gradient_norm = (grad_w.iter().map(|g| g * g).sum::<f64>() + grad_b * grad_b).sqrt();
            if gradient_norm < self.config.tolerance {
                w.clone_from(&vw);
                b = vb;
                converged = true;
                break;
            }
            iterations += 1;

            let t = (1.0 + (1.0 + 4.0 * t_prev * t_prev).sqrt()) / 2.0;
            let momentum = (t_prev - 1.0) / t;
            for j in 0..dim {
                let next = vw[j] - step * grad_w[j];
                vw[j] = next + momentum * (next - w[j]);
                w[j] = next;
            }
            let next_b = vb - step * grad_b;
            vb = next_b + momentum * (next_b - b);
            b = next_b;
            t_prev = t;

            if iterations % 100 == 0 {
                debug!(iterations, gradient_norm, "training progress");
            }
        }

        let final_loss = objective(loss, samples, labels, &w, b, lambda);
        let classifier = LinearClassifier::new(w, b, loss);
        Ok((
            classifier,
            TrainingSummary {
                iterations,
                converged,
                final_loss,
                gradient_norm,
            },
        ))
    }
}

/// Writes the weight gradient into `grad_w` and returns the bias gradient.
fn gradient(
    loss: Loss,
    samples: &[FeatureVector],
    labels: &[bool],
    w: &[f64],
    b: f64,
    lambda: f64,
    grad_w: &mut [f64],
) -> f64 {
    let n = samples.len() as f64;
    for (g, wj) in grad_w.iter_mut().zip(w) {
        *g = lambda * wj;
    }
    let mut grad_b = 0.0;
    for (x, &y) in samples.iter().zip(labels) {
        let z = x.dot(w) + b;
        let e = loss.derivative(z, y) / n;
        if e == 0.0 {
            continue;
        }
        for &(j, v) in x.entries() {
            if let Some(g) = grad_w.get_mut(j) {
                *g += e * v;
            }
        }
        grad_b += e;
    }
    grad_b
}

fn objective(
    loss: Loss,
    samples: &[FeatureVector],
    labels: &[bool],
    w: &[f64],
    b: f64,
    lambda: f64,
) -> f64 {
    let n = samples.len() as f64;
    let data: f64 = samples
        .iter()
        .zip(labels)
        .map(|(x, &y)| loss.value(x.dot(w) + b, y))
        .sum::<f64>()
        / n;
    data + 0.5 * lambda * w.iter().map(|v| v * v).sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(dim: usize, i: usize) -> FeatureVector {
        FeatureVector {
            dim,
            entries: vec![(i, 1.0)],
        }
    }

    #[test]
    fn separates_orthogonal_classes() {
        let samples = vec![unit(2, 0), unit(2, 1)];
        let labels = vec![true, false];
        let (clf, summary) = Trainer::new(ModelConfig::default())
            .fit(&samples, &labels, 2)
            .unwrap();
        assert!(clf.weights()[0] > 0.0);
        assert!(clf.weights()[1] < 0.0);
        assert!(clf.predict_probability(&samples[0]) > 0.5);
        assert!(clf.predict_probability(&samples[1]) < 0.5);
        assert!(summary.final_loss < std::f64::consts::LN_2);
    }

    #[test]
    fn rejects_single_class() {
        let samples = vec![unit(2, 0), unit(2, 1)];
        let err = Trainer::new(ModelConfig::default())
            .fit(&samples, &[true, true], 2)
            .unwrap_err();
        assert!(matches!(err, DetectorError::TrainingData(_)));
    }

    #[test]
    fn stops_at_max_iter() {
        let samples = vec![unit(2, 0), unit(2, 1)];
        let config = ModelConfig {
            max_iter: 3,
            tolerance: 0.0,
            ..ModelConfig::default()
        };
        let (_, summary) = Trainer::new(config)
            .fit(&samples, &[true, false], 2)
            .unwrap();
        assert_eq!(summary.iterations, 3);
        assert!(!summary.converged);
    }
}
