//! Dataset ingestion: best-effort parsing of a delimited claims table.
//!
//! Ingestion is forgiving at the row level (malformed rows are skipped, the
//! file may be non-UTF-8) but strict about configuration: a missing label
//! column or an empty table after filtering aborts the run.

use std::fs;
use std::path::Path;

use crate::common::{Error, Result};

use super::domain::{
    binarize_label, ClaimRecord, Field, FieldKind, FieldValue, LabeledDataset, DROPPED_COLUMNS,
    LABEL_COLUMN,
};

/// Load a labeled claims dataset from a comma-delimited file with a header
/// row. Rows missing the label or failing to parse are skipped and counted.
pub fn load_dataset(path: &Path) -> Result<LabeledDataset> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let mut lines = text.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| Error::dataset(format!("{} is empty", path.display())))?;
    let headers = split_row(header_line);

    let label_idx = headers
        .iter()
        .position(|h| *h == LABEL_COLUMN)
        .ok_or_else(|| {
            Error::config(format!(
                "label column '{LABEL_COLUMN}' missing from {}",
                path.display()
            ))
        })?;

    let columns: Vec<Option<Field>> = headers.iter().map(|h| Field::from_name(h)).collect();
    for (header, column) in headers.iter().zip(&columns) {
        if column.is_none() && *header != LABEL_COLUMN {
            if DROPPED_COLUMNS.contains(header) {
                log::debug!("dropping identifier column '{header}'");
            } else {
                log::warn!("ignoring unrecognised column '{header}'");
            }
        }
    }

    let mut dataset = LabeledDataset::default();
    let mut malformed = 0usize;
    let mut unlabeled = 0usize;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_row(line);
        if cells.len() != headers.len() {
            malformed += 1;
            continue;
        }
        let Some(label) = binarize_label(cells[label_idx]) else {
            unlabeled += 1;
            continue;
        };
        match parse_row(&cells, &columns) {
            Some(record) => {
                dataset.records.push(record);
                dataset.labels.push(label);
            }
            None => malformed += 1,
        }
    }

    log::info!(
        "loaded {} rows from {} ({malformed} malformed skipped, {unlabeled} without label)",
        dataset.len(),
        path.display()
    );

    if dataset.is_empty() {
        return Err(Error::config(format!(
            "dataset {} is empty after filtering",
            path.display()
        )));
    }

    Ok(dataset)
}

// TODO: Handle quoted cells if a dataset export ever carries embedded commas.
fn split_row(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

/// Parse one data row against the resolved columns. Returns `None` when a
/// numeric cell does not parse, which skips the whole row.
fn parse_row(cells: &[&str], columns: &[Option<Field>]) -> Option<ClaimRecord> {
    let mut record = ClaimRecord::new();
    for (cell, column) in cells.iter().zip(columns) {
        let Some(field) = column else { continue };
        match field.kind() {
            FieldKind::Numeric => {
                let value: f64 = cell.parse().ok()?;
                record.insert(*field, FieldValue::Number(value));
            }
            FieldKind::Categorical => {
                record.insert(*field, FieldValue::Text((*cell).to_string()));
            }
        }
    }
    Some(record)
}
