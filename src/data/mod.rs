//! Claim schema and dataset ingestion.

pub mod domain;
pub mod service;

pub use domain::{ClaimRecord, Field, FieldKind, FieldValue, LabeledDataset};
