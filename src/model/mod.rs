//! Linear classifier and its trainer.

mod linear;
mod train;

pub use linear::{sigmoid, LinearClassifier, Loss};
pub use train::{Trainer, TrainingSummary};
