//! Hold-out evaluation reported to the operator after training.

pub mod domain;
pub mod service;

pub use domain::{ConfusionMatrix, EvalReport};
