//! Domain types for single-claim inference.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::CLASS_FRAUDULENT;

/// Binary classification outcome.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Legitimate,
    Fraudulent,
}

impl Verdict {
    pub fn from_class(class: u8) -> Self {
        if class == CLASS_FRAUDULENT {
            Verdict::Fraudulent
        } else {
            Verdict::Legitimate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Legitimate => "legitimate",
            Verdict::Fraudulent => "fraudulent",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scoring one claim record.
#[derive(Clone, Debug, Serialize)]
pub struct Prediction {
    pub verdict: Verdict,
    /// Probability mass the classifier assigned to `verdict`, in [0, 1].
    pub confidence: f64,
    /// One entry per fallback substitution applied while encoding. Empty
    /// when every categorical value was inside the fitted vocabulary.
    pub warnings: Vec<String>,
}
