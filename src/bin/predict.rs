//! Interactive predictor: load the artifact pair once, then score claim
//! records supplied as JSON objects keyed by field name.
//!
//! With a file argument the record in that file is scored once. Without
//! arguments the tool reads one JSON record per line from stdin and keeps
//! serving after per-record failures; only an unreadable artifact pair at
//! startup is fatal.

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use claimlens::common::config::AppCfg;
use claimlens::training::{ArtifactRepo, FsArtifactRepo};
use claimlens::{ClaimRecord, Prediction, Predictor};

fn main() -> ExitCode {
    env_logger::init();
    let cfg = AppCfg::load();

    let artifacts = match FsArtifactRepo::new(&cfg).load() {
        Ok(artifacts) => artifacts,
        Err(err) => {
            eprintln!("cannot load artifact pair from {}: {err}", cfg.artifact_dir);
            return ExitCode::FAILURE;
        }
    };
    let predictor = Predictor::new(artifacts);

    match env::args().nth(1) {
        Some(path) => score_file(&predictor, &path),
        None => interactive(&predictor),
    }
}

fn score_file(predictor: &Predictor, path: &str) -> ExitCode {
    match fs::read_to_string(path)
        .map_err(claimlens::Error::from)
        .and_then(|text| score_json(predictor, &text))
    {
        Ok(prediction) => {
            report(&prediction);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("cannot score {path}: {err}");
            ExitCode::FAILURE
        }
    }
}

fn interactive(predictor: &Predictor) -> ExitCode {
    let stdin = io::stdin();
    loop {
        print!("claim> ");
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") {
            break;
        }
        // Per-record failures are reported and the loop keeps serving.
        match score_json(predictor, line) {
            Ok(prediction) => report(&prediction),
            Err(err) => eprintln!("cannot score record: {err}"),
        }
    }
    ExitCode::SUCCESS
}

fn score_json(predictor: &Predictor, text: &str) -> claimlens::Result<Prediction> {
    let record: ClaimRecord = serde_json::from_str(text)?;
    predictor.predict(&record)
}

fn report(prediction: &Prediction) {
    println!(
        "{} claim (confidence {:.1}%)",
        prediction.verdict,
        prediction.confidence * 100.0
    );
    for warning in &prediction.warnings {
        println!("  note: {warning}");
    }
}
