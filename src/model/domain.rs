//! Classifier contract.
//!
//! The rest of the pipeline treats the trained model as opaque: it maps a
//! fixed-order numeric feature vector to a class and a per-class probability.
//! What is not opaque is the schema: the classifier owns the authoritative
//! list of feature columns it was fitted on, and callers must align their
//! vectors to it.

use crate::common::Result;

/// Class index for legitimate claims.
pub const CLASS_LEGITIMATE: u8 = 0;
/// Class index for fraudulent claims.
pub const CLASS_FRAUDULENT: u8 = 1;

/// A trained binary classifier over fixed-order numeric feature vectors.
pub trait Classifier {
    /// Feature column names, in exactly the order `predict` expects.
    fn feature_names(&self) -> &[String];

    /// Class label for one feature vector.
    fn predict(&self, features: &[f64]) -> Result<u8>;

    /// Probability mass per class, indexed `[legitimate, fraudulent]`.
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2]>;
}
