//! Shared utilities that glue the different domains together.

pub mod config;
pub mod error;
pub mod ids;
pub mod time;

pub use error::{Error, Result};
