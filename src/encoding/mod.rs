//! The fitted categorical encoding contract shared by trainer and predictor.

pub mod domain;

pub use domain::{CategoryEncoder, EncoderSet};
