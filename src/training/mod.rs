//! Offline training: pipeline, run configuration and artifact persistence.

pub mod domain;
pub mod repo_fs;
pub mod service;

pub use domain::{ArtifactRepo, PairStamp, TrainConfig, TrainReport, TrainedArtifacts};
pub use repo_fs::FsArtifactRepo;
