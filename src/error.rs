//! Error types for sendr
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in sendr
#[derive(Debug, Error)]
pub enum SendrError {
    /// Fatal configuration problem - missing credential, incomplete config,
    /// non-positive amount or iteration count. Raised before any submission.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Human-entered amount cannot be normalized into base units
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Connector could not be constructed (pre-loop initialization fault)
    #[error("Connector error: {0}")]
    Connector(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for sendr operations
pub type Result<T> = std::result::Result<T, SendrError>;
