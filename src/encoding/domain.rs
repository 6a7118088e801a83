//! Fitted category encoders: frozen vocabulary-to-code maps.
//!
//! This is the contract that must stay identical between training and
//! inference. Codes are vocabulary ranks: the fitted values are sorted
//! lexicographically and a value's code is its index in that order, so the
//! same vocabulary always yields the same codes regardless of the order the
//! values were observed in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::{ClaimRecord, Field, FieldKind, FieldValue};

/// Bidirectional mapping between one field's string vocabulary and integer
/// codes. The vocabulary is frozen once fitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEncoder {
    classes: Vec<String>,
}

impl CategoryEncoder {
    /// Fit over the values observed during training. Duplicates collapse;
    /// the result is the sorted distinct vocabulary.
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = values.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    /// Code for a fitted value, `None` when the value is outside the
    /// vocabulary.
    pub fn encode(&self, value: &str) -> Option<u32> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(value))
            .ok()
            .map(|i| i as u32)
    }

    /// The fitted value behind a code.
    pub fn decode(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }

    /// Encode a possibly missing or unknown value. A value outside the
    /// vocabulary (or no value at all) deterministically maps to code 0, the
    /// lexicographically first fitted class; the second element reports the
    /// substituted class when that happened. `None` only when the vocabulary
    /// is empty, which makes fallback impossible.
    pub fn encode_or_fallback(&self, value: Option<&str>) -> Option<(u32, Option<&str>)> {
        let first = self.classes.first()?;
        match value.and_then(|v| self.encode(v)) {
            Some(code) => Some((code, None)),
            None => Some((0, Some(first.as_str()))),
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// The full encoder collection artifact: one fitted encoder per categorical
/// field. Written once by the trainer, loaded read-only by the predictor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderSet {
    by_field: BTreeMap<Field, CategoryEncoder>,
}

impl EncoderSet {
    /// Fit one encoder per categorical schema field over the given training
    /// records. Fields no record carries get no encoder at all, mirroring
    /// how the trained table has no such column; their feature slot is
    /// zero-filled during alignment instead.
    pub fn fit<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ClaimRecord> + Clone,
    {
        let mut by_field = BTreeMap::new();
        for field in Field::ALL {
            if field.kind() != FieldKind::Categorical {
                continue;
            }
            let values = records
                .clone()
                .into_iter()
                .filter_map(|r| r.get(field).and_then(FieldValue::as_text))
                .map(str::to_string);
            let encoder = CategoryEncoder::fit(values);
            if !encoder.is_empty() {
                by_field.insert(field, encoder);
            }
        }
        Self { by_field }
    }

    pub fn get(&self, field: Field) -> Option<&CategoryEncoder> {
        self.by_field.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &CategoryEncoder)> {
        self.by_field.iter().map(|(f, e)| (*f, e))
    }

    pub fn len(&self) -> usize {
        self.by_field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }
}
