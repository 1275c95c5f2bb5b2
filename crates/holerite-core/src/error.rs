//! Error types for the holerite-core library.
//!
//! Payslip extraction itself never fails: malformed OCR text degrades to
//! missing fields plus validation messages. Errors here cover the fallible
//! surfaces around the parser, mainly configuration handling.

use thiserror::Error;

/// Main error type for the holerite library.
#[derive(Error, Debug)]
pub enum HoleriteError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the holerite library.
pub type Result<T> = std::result::Result<T, HoleriteError>;
