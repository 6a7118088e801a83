//! Online inference over one loaded, immutable artifact pair.

pub mod domain;
pub mod service;

pub use domain::{Prediction, Verdict};
pub use service::Predictor;
