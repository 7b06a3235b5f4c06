//! Error types for marga.
//!
//! Only construction-time failures (file I/O, config parsing, an unusable
//! map) surface as errors. Runtime failures inside the core — invalid node
//! references, out-of-bounds queries, unreachable goals, malformed map
//! rows — are reported as diagnostics and degrade to no-ops or empty
//! results; they never unwind across component boundaries.

use thiserror::Error;

/// Marga error type
#[derive(Error, Debug)]
pub enum MargaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for MargaError {
    fn from(e: toml::de::Error) -> Self {
        MargaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MargaError>;
