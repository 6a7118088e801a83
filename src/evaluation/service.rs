//! Hold-out evaluation pass run at the end of training.

use crate::common::Result;
use crate::model::Classifier;

use super::domain::{ConfusionMatrix, EvalReport};

/// Score every hold-out row and accumulate the confusion counts.
pub fn evaluate(
    classifier: &dyn Classifier,
    rows: &[Vec<f64>],
    labels: &[u8],
) -> Result<EvalReport> {
    let mut confusion = ConfusionMatrix::default();
    for (row, &actual) in rows.iter().zip(labels) {
        let predicted = classifier.predict(row)?;
        confusion.record(actual, predicted);
    }
    Ok(EvalReport { confusion })
}
