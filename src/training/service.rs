//! The offline training pipeline.
//!
//! load → filter → binarize → split → fit encoders on the training partition
//! only → encode → fit forest → evaluate on the hold-out. Encoders never see
//! hold-out or inference-time values, so vocabulary leakage is impossible;
//! hold-out rows with categories outside the fitted vocabulary go through
//! the same deterministic fallback the predictor applies.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::common::ids::SimpleHash;
use crate::common::{time, Error, Result};
use crate::data::{ClaimRecord, Field, FieldKind, FieldValue, LabeledDataset};
use crate::encoding::EncoderSet;
use crate::evaluation;

use super::domain::{PairStamp, TrainConfig, TrainReport, TrainedArtifacts};
use crate::model::Forest;

/// Train a classifier and its matching encoder collection on a labeled
/// dataset, evaluating on a seeded hold-out partition.
pub fn train(
    dataset: &LabeledDataset,
    cfg: &TrainConfig,
) -> Result<(TrainedArtifacts, TrainReport)> {
    if dataset.is_empty() {
        return Err(Error::config("cannot train on an empty dataset"));
    }

    let mut order: Vec<usize> = (0..dataset.len()).collect();
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    order.shuffle(&mut rng);

    let holdout_len = ((dataset.len() as f64) * cfg.test_fraction).round() as usize;
    // Always keep at least one training row.
    let holdout_len = holdout_len.min(dataset.len() - 1);
    let (holdout_idx, train_idx) = order.split_at(holdout_len);

    let encoders = EncoderSet::fit(train_idx.iter().map(|&i| &dataset.records[i]));

    let feature_names: Vec<String> = Field::ALL.iter().map(|f| f.name().to_string()).collect();
    let encode = |idx: &[usize]| -> (Vec<Vec<f64>>, Vec<u8>) {
        let rows = idx
            .iter()
            .map(|&i| encode_record(&encoders, &dataset.records[i]))
            .collect();
        let labels = idx.iter().map(|&i| dataset.labels[i]).collect();
        (rows, labels)
    };
    let (train_rows, train_labels) = encode(train_idx);
    let (holdout_rows, holdout_labels) = encode(holdout_idx);

    let forest = Forest::fit(feature_names, &train_rows, &train_labels, cfg.forest.clone())?;

    let eval = evaluation::service::evaluate(&forest, &holdout_rows, &holdout_labels)?;
    log::info!(
        "trained on {} rows, {} held out: {eval}",
        train_idx.len(),
        holdout_idx.len()
    );

    let report = TrainReport {
        total_rows: dataset.len(),
        train_rows: train_idx.len(),
        holdout_rows: holdout_idx.len(),
        eval,
    };
    let artifacts = TrainedArtifacts::new(pair_stamp(cfg, dataset.len()), forest, encoders);
    Ok((artifacts, report))
}

/// Encode one record into a feature row in `Field::ALL` order. Missing
/// numeric fields become zero; categorical values go through the fitted
/// encoder with the deterministic fallback for anything outside the
/// vocabulary.
fn encode_record(encoders: &EncoderSet, record: &ClaimRecord) -> Vec<f64> {
    Field::ALL
        .iter()
        .map(|&field| match field.kind() {
            FieldKind::Categorical => encoders
                .get(field)
                .and_then(|e| e.encode_or_fallback(record.get(field).and_then(FieldValue::as_text)))
                .map(|(code, _)| code as f64)
                .unwrap_or(0.0),
            FieldKind::Numeric => record
                .get(field)
                .and_then(FieldValue::as_number)
                .unwrap_or(0.0),
        })
        .collect()
}

/// Stamp tying both artifacts of this run together. Hashes the run
/// parameters plus the wall clock so two runs never share a stamp.
fn pair_stamp(cfg: &TrainConfig, rows: usize) -> PairStamp {
    let mut hasher = SimpleHash::new();
    hasher.update(&cfg.seed.to_le_bytes());
    hasher.update(&(rows as u64).to_le_bytes());
    hasher.update(&time::now_ms().to_le_bytes());
    PairStamp::new(format!("run-{}", hasher.finish_hex()))
}
