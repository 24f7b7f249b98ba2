//! Error types for the anniversary page core

use thiserror::Error;

/// Core anniversary errors
#[derive(Error, Debug)]
pub enum AnnivError {
    // Generator errors
    #[error("Invalid range: lo {lo} must be finite and below hi {hi}")]
    InvalidRange { lo: f64, hi: f64 },

    #[error("Invalid seed: {0} is not a finite number")]
    InvalidSeed(f64),

    // Model errors
    #[error("Unknown {kind}: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    // Asset errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for anniversary operations
pub type AnnivResult<T> = Result<T, AnnivError>;
