//! The classification model: contract plus the CART forest implementation.

pub mod domain;
pub mod forest;

pub use domain::{Classifier, CLASS_FRAUDULENT, CLASS_LEGITIMATE};
pub use forest::{Forest, ForestConfig};
