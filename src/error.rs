//! Error types for CSV parsing, encoding and table manipulation

use thiserror::Error;

/// Errors produced by this crate
#[derive(Error, Debug)]
pub enum CsvError {
    /// Invalid parser/encoder configuration (checked once at construction)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A table mutation or lookup was rejected; the table is left unchanged
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// An operation was attempted on an already-closed reader or writer
    #[error("Usage error: {0}")]
    UsageError(String),

    /// Failed to read from a CSV source
    #[error("Read error: {0}")]
    ReadError(String),

    /// Failed to write to a CSV destination
    #[error("Write error: {0}")]
    WriteError(String),
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, CsvError>;
