//! Offline trainer: fit the classifier and encoder collection from a labeled
//! claims table and persist them as a matched artifact pair.

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use claimlens::common::config::AppCfg;
use claimlens::data;
use claimlens::training::{service, ArtifactRepo, FsArtifactRepo, TrainConfig, TrainReport};

fn main() -> ExitCode {
    env_logger::init();
    let cfg = AppCfg::load();

    let dataset_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.data_root).join("insurance_claims.csv"));

    match run(&cfg, &dataset_path) {
        Ok(report) => {
            println!(
                "trained on {} rows ({} held out): {}",
                report.train_rows, report.holdout_rows, report.eval
            );
            println!("artifact pair written to {}", cfg.artifact_dir);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("training failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cfg: &AppCfg, dataset_path: &Path) -> claimlens::Result<TrainReport> {
    let dataset = data::service::load_dataset(dataset_path)?;
    let (artifacts, report) = service::train(&dataset, &TrainConfig::seeded(cfg.seed))?;
    FsArtifactRepo::new(cfg).save(&artifacts)?;
    Ok(report)
}
