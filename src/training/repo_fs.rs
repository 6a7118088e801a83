//! Filesystem repository for the trained artifact pair.
//!
//! Each half is written to a temporary name and renamed into place, so an
//! aborted run never leaves a partially written artifact behind. Loading
//! re-verifies that both halves carry the same pair stamp.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::common::config::AppCfg;
use crate::common::{Error, Result};

use super::domain::{ArtifactRepo, EncoderArtifact, ModelArtifact, TrainedArtifacts};

/// Persist and load the artifact pair under `cfg.artifact_dir`.
pub struct FsArtifactRepo {
    root: PathBuf,
}

impl FsArtifactRepo {
    pub fn new(cfg: &AppCfg) -> Self {
        Self {
            root: PathBuf::from(&cfg.artifact_dir),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.root.join("model.json")
    }

    pub fn encoders_path(&self) -> PathBuf {
        self.root.join("encoders.json")
    }

    fn write_atomic<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let bytes = fs::read(path)
            .map_err(|e| Error::artifact(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::artifact(format!("cannot parse {}: {e}", path.display())))
    }
}

impl ArtifactRepo for FsArtifactRepo {
    fn save(&self, artifacts: &TrainedArtifacts) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        self.write_atomic(&self.model_path(), artifacts.model_artifact())?;
        self.write_atomic(&self.encoders_path(), artifacts.encoder_artifact())?;
        log::info!(
            "saved artifact pair {} under {}",
            artifacts.stamp().as_str(),
            self.root.display()
        );
        Ok(())
    }

    fn load(&self) -> Result<TrainedArtifacts> {
        let model: ModelArtifact = self.read(&self.model_path())?;
        let encoders: EncoderArtifact = self.read(&self.encoders_path())?;
        TrainedArtifacts::from_parts(model, encoders)
    }
}
