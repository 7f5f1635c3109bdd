//! Centralized error types for COMEX.
//!
//! Data operations on the stores never fail; these errors surface only from
//! configuration, backend construction and argument parsing.

use thiserror::Error;

/// Main error type for COMEX operations.
#[derive(Error, Debug)]
pub enum ComexError {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Supplier not found: {0}")]
    SupplierNotFound(String),

    #[error("Unknown stage '{0}'")]
    UnknownStage(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    Store(#[from] comex_store::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for COMEX operations.
pub type ComexResult<T> = Result<T, ComexError>;

impl ComexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
