//! Threshold decision over classifier probabilities.

mod engine;

pub use engine::{decide, Detection, Label, Threshold};
