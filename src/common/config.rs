//! Runtime configuration loaded from the process environment.
//!
//! The snapshot is constructed once at startup and passed by reference into
//! services; nothing in the crate reads the environment after that.

use std::env;

/// Snapshot of configuration values consumed by the binaries.
#[derive(Clone, Debug)]
pub struct AppCfg {
    /// Directory holding training datasets.
    pub data_root: String,
    /// Directory the artifact pair is written to and loaded from.
    pub artifact_dir: String,
    /// Seed for the train/hold-out split and forest bootstrap sampling.
    pub seed: u64,
}

impl AppCfg {
    /// Create a configuration snapshot from the process environment.
    pub fn load() -> Self {
        fn env_or(key: &str, default: &str) -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        }

        Self {
            data_root: env_or("CLAIMLENS_DATA_ROOT", "./data"),
            artifact_dir: env_or("CLAIMLENS_ARTIFACT_DIR", "./model"),
            seed: env_or("CLAIMLENS_SEED", "42").parse().unwrap_or(42),
        }
    }
}
