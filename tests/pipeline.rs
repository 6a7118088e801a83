//! End-to-end pipeline: ingest a CSV, train, persist the artifact pair,
//! reload it, and score claims the way the predictor binary does.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use claimlens::common::config::AppCfg;
use claimlens::data::service::load_dataset;
use claimlens::training::{service, ArtifactRepo, FsArtifactRepo, TrainConfig};
use claimlens::{ClaimRecord, Error, Field, Predictor, Verdict};

fn write_dataset(path: &Path, rows: usize) {
    let mut csv = String::from(
        "policy_number,policy_state,incident_severity,police_report_available,\
         age,total_claim_amount,witnesses,fraud_reported\n",
    );
    for i in 0..rows {
        let fraud = i % 2 == 1;
        csv.push_str(&format!(
            "P-{i},{},{},{},{},{},{},{}\n",
            ["OH", "IL", "IN"][i % 3],
            if fraud { "Total Loss" } else { "Trivial Damage" },
            if fraud { "NO" } else { "YES" },
            25 + (i % 40),
            if fraud { 60000 } else { 4000 },
            i % 4,
            if fraud { "Y" } else { "N" },
        ));
    }
    // One malformed row and one without a label; both must be skipped.
    csv.push_str("P-bad,OH,Total Loss\n");
    csv.push_str("P-x,OH,Total Loss,NO,30,60000,1,\n");
    fs::write(path, csv).expect("write dataset");
}

fn cfg_for(dir: &Path, seed: u64) -> AppCfg {
    AppCfg {
        data_root: dir.display().to_string(),
        artifact_dir: dir.join("model").display().to_string(),
        seed,
    }
}

fn quick_train_config(seed: u64) -> TrainConfig {
    let mut cfg = TrainConfig::seeded(seed);
    cfg.forest.trees = 20;
    cfg
}

fn fraud_record() -> ClaimRecord {
    let mut record = ClaimRecord::new();
    record.set_text(Field::PolicyState, "OH");
    record.set_text(Field::IncidentSeverity, "Total Loss");
    record.set_text(Field::PoliceReportAvailable, "NO");
    record.set_number(Field::Age, 31.0);
    record.set_number(Field::TotalClaimAmount, 60_000.0);
    record.set_number(Field::Witnesses, 1.0);
    record
}

#[test]
fn train_save_load_predict() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dataset_path = dir.path().join("claims.csv");
    write_dataset(&dataset_path, 60);
    let cfg = cfg_for(dir.path(), 42);

    let dataset = load_dataset(&dataset_path).expect("load dataset");
    assert_eq!(dataset.len(), 60);

    let (artifacts, report) = service::train(&dataset, &quick_train_config(42)).expect("train");
    assert!(report.eval.confusion.accuracy() > 0.9);

    let repo = FsArtifactRepo::new(&cfg);
    repo.save(&artifacts).expect("save pair");

    let loaded = repo.load().expect("load pair");
    assert_eq!(loaded.stamp(), artifacts.stamp());

    let predictor = Predictor::new(loaded);
    let prediction = predictor.predict(&fraud_record()).expect("predict");
    assert_eq!(prediction.verdict, Verdict::Fraudulent);
    assert!((0.0..=1.0).contains(&prediction.confidence));
    assert!(prediction.warnings.is_empty());

    // A record missing a categorical field still gets a verdict, with the
    // substitution surfaced as a warning.
    let mut partial = fraud_record();
    partial.remove(Field::PolicyState);
    let fallback = predictor.predict(&partial).expect("predict with fallback");
    assert!((0.0..=1.0).contains(&fallback.confidence));
    assert!(!fallback.warnings.is_empty());
}

#[test]
fn json_records_score_like_the_predictor_binary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dataset_path = dir.path().join("claims.csv");
    write_dataset(&dataset_path, 60);

    let dataset = load_dataset(&dataset_path).expect("load dataset");
    let (artifacts, _) = service::train(&dataset, &quick_train_config(42)).expect("train");
    let predictor = Predictor::new(artifacts);

    let record: ClaimRecord = serde_json::from_str(
        r#"{
            "policy_state": "IL",
            "incident_severity": "Trivial Damage",
            "police_report_available": "YES",
            "age": 44,
            "total_claim_amount": 4000,
            "witnesses": 2
        }"#,
    )
    .expect("parse record");

    let prediction = predictor.predict(&record).expect("predict");
    assert_eq!(prediction.verdict, Verdict::Legitimate);
    assert!(prediction.confidence >= 0.5);
}

#[test]
fn artifacts_from_different_runs_are_rejected_as_a_pair() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dataset_path = dir.path().join("claims.csv");
    write_dataset(&dataset_path, 40);
    let dataset = load_dataset(&dataset_path).expect("load dataset");

    let cfg_a = cfg_for(&dir.path().join("a"), 1);
    let cfg_b = cfg_for(&dir.path().join("b"), 2);
    let repo_a = FsArtifactRepo::new(&cfg_a);
    let repo_b = FsArtifactRepo::new(&cfg_b);

    let (run_a, _) = service::train(&dataset, &quick_train_config(1)).expect("train a");
    let (run_b, _) = service::train(&dataset, &quick_train_config(2)).expect("train b");
    repo_a.save(&run_a).expect("save a");
    repo_b.save(&run_b).expect("save b");

    // Splice run B's encoders next to run A's model.
    fs::copy(repo_b.encoders_path(), repo_a.encoders_path()).expect("splice encoders");
    match repo_a.load() {
        Err(Error::Artifact(msg)) => assert!(msg.contains("stamp")),
        other => panic!("expected artifact mismatch, got {other:?}"),
    }
}

#[test]
fn unreadable_artifacts_are_fatal_at_startup() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = FsArtifactRepo::new(&cfg_for(dir.path(), 42));
    assert!(matches!(repo.load(), Err(Error::Artifact(_))));
}
