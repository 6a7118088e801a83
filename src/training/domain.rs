//! Domain types for training runs and the persisted artifact pair.

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};
use crate::encoding::EncoderSet;
use crate::evaluation::EvalReport;
use crate::model::{Forest, ForestConfig};

/// Knobs for one training run.
#[derive(Clone, Debug)]
pub struct TrainConfig {
    pub forest: ForestConfig,
    /// Fraction of rows held out for evaluation.
    pub test_fraction: f64,
    /// Seed for the train/hold-out shuffle.
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            forest: ForestConfig::default(),
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

impl TrainConfig {
    /// Config with every seed set to the same value.
    pub fn seeded(seed: u64) -> Self {
        Self {
            forest: ForestConfig {
                seed,
                ..ForestConfig::default()
            },
            seed,
            ..Self::default()
        }
    }
}

/// Stamp written into both artifact files of one run. A classifier and an
/// encoder collection may only be used together when their stamps match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PairStamp(String);

impl PairStamp {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Serialized form of the classifier artifact file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub pair_stamp: PairStamp,
    pub forest: Forest,
}

/// Serialized form of the encoder collection artifact file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EncoderArtifact {
    pub pair_stamp: PairStamp,
    pub encoders: EncoderSet,
}

/// The matched output of one training run. Construction enforces that both
/// halves carry the same stamp, so a mixed pair cannot be represented.
#[derive(Clone, Debug)]
pub struct TrainedArtifacts {
    model: ModelArtifact,
    encoders: EncoderArtifact,
}

impl TrainedArtifacts {
    pub fn new(stamp: PairStamp, forest: Forest, encoders: EncoderSet) -> Self {
        Self {
            model: ModelArtifact {
                pair_stamp: stamp.clone(),
                forest,
            },
            encoders: EncoderArtifact {
                pair_stamp: stamp,
                encoders,
            },
        }
    }

    /// Rebuild from two independently loaded halves, verifying they came
    /// from the same training run.
    pub fn from_parts(model: ModelArtifact, encoders: EncoderArtifact) -> Result<Self> {
        if model.pair_stamp != encoders.pair_stamp {
            return Err(Error::artifact(format!(
                "model stamp {} does not match encoder stamp {}; \
                 refusing a mixed artifact pair",
                model.pair_stamp.as_str(),
                encoders.pair_stamp.as_str()
            )));
        }
        Ok(Self { model, encoders })
    }

    pub fn stamp(&self) -> &PairStamp {
        &self.model.pair_stamp
    }

    pub fn forest(&self) -> &Forest {
        &self.model.forest
    }

    pub fn encoders(&self) -> &EncoderSet {
        &self.encoders.encoders
    }

    pub fn model_artifact(&self) -> &ModelArtifact {
        &self.model
    }

    pub fn encoder_artifact(&self) -> &EncoderArtifact {
        &self.encoders
    }
}

/// Summary reported to the operator after a run.
#[derive(Clone, Debug)]
pub struct TrainReport {
    pub total_rows: usize,
    pub train_rows: usize,
    pub holdout_rows: usize,
    pub eval: EvalReport,
}

/// Repository contract for the artifact pair.
pub trait ArtifactRepo {
    fn save(&self, artifacts: &TrainedArtifacts) -> Result<()>;
    fn load(&self) -> Result<TrainedArtifacts>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Forest;

    fn tiny_forest() -> Forest {
        Forest::fit(
            vec!["f0".to_string()],
            &[vec![0.0], vec![1.0]],
            &[0, 1],
            ForestConfig {
                trees: 1,
                ..ForestConfig::default()
            },
        )
        .expect("fit")
    }

    #[test]
    fn mixed_pairs_are_rejected() {
        let model = ModelArtifact {
            pair_stamp: PairStamp::new("run-a"),
            forest: tiny_forest(),
        };
        let encoders = EncoderArtifact {
            pair_stamp: PairStamp::new("run-b"),
            encoders: EncoderSet::default(),
        };
        assert!(matches!(
            TrainedArtifacts::from_parts(model, encoders),
            Err(Error::Artifact(_))
        ));
    }

    #[test]
    fn matched_pairs_reassemble() {
        let artifacts = TrainedArtifacts::new(
            PairStamp::new("run-a"),
            tiny_forest(),
            EncoderSet::default(),
        );
        let rebuilt = TrainedArtifacts::from_parts(
            artifacts.model_artifact().clone(),
            artifacts.encoder_artifact().clone(),
        )
        .expect("matched pair");
        assert_eq!(rebuilt.stamp(), artifacts.stamp());
    }
}
