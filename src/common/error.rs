//! Error handling primitives shared across the crate.
//!
//! The taxonomy separates fatal operator-facing failures (bad configuration,
//! unreadable artifacts) from per-request failures that must leave an
//! interactive session serving.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Canonical error type for the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Fatal trainer misconfiguration (missing label column, empty dataset).
    #[error("configuration error: {0}")]
    Config(String),

    /// Dataset ingestion failure that is not row-level (rows that fail to
    /// parse are skipped, not errored).
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Artifact files unreadable, corrupt, or from different training runs.
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Per-request prediction failure. Carries the assembled feature vector
    /// so a failing request can be debugged offline.
    #[error("record error: {detail} (features: {features:?})")]
    Record { detail: String, features: Vec<f64> },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// Fatal configuration helper.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Dataset ingestion helper.
    pub fn dataset(msg: impl Into<String>) -> Self {
        Error::Dataset(msg.into())
    }

    /// Artifact load/save helper.
    pub fn artifact(msg: impl Into<String>) -> Self {
        Error::Artifact(msg.into())
    }

    /// Per-request helper; pass whatever portion of the feature vector was
    /// assembled before the failure.
    pub fn record(detail: impl Into<String>, features: Vec<f64>) -> Self {
        Error::Record {
            detail: detail.into(),
            features,
        }
    }

    /// Whether the serving process should keep running after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Record { .. })
    }
}
