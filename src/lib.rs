//! Insurance-claim fraud detection in two halves: an offline trainer that
//! fits a categorical encoding and a forest classifier from a labeled claims
//! table, and an online predictor that reproduces that exact encoding to
//! score single claims. The artifact pair (classifier + encoder collection)
//! is the only state shared between them, produced once per training run and
//! loaded read-only for the lifetime of the serving process.

pub mod common;
pub mod data;
pub mod encoding;
pub mod evaluation;
pub mod inference;
pub mod model;
pub mod training;

pub use common::{Error, Result};
pub use data::{ClaimRecord, Field, FieldKind, FieldValue};
pub use inference::{Prediction, Predictor, Verdict};
pub use training::{TrainConfig, TrainedArtifacts};
