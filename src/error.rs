//! Error types for mcp-router
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while routing a request
#[derive(Debug, Error)]
pub enum RouterError {
    /// Network, timeout or process I/O failure talking to the model or provider
    #[error("Transport error: {0}")]
    Transport(String),

    /// Model output that is not JSON or lacks a required field
    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),

    /// Provider rejected or failed a tool call
    #[error("Execution error: {0}")]
    Execution(String),

    /// Missing credential or unusable configuration, detected at startup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON-RPC error object returned by the provider
    #[error("RPC error [{code}]: {message}")]
    Rpc { code: i64, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for mcp-router operations
pub type Result<T> = std::result::Result<T, RouterError>;
