// src/error.rs

//! Unified error handling for the redirect resolver.

use std::fmt;

use thiserror::Error;

/// Result type alias for resolver operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// AWS S3 error
    #[error("S3 error: {0}")]
    S3(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// No matcher in the chain accepted the path.
    ///
    /// Only reachable when the chain was built without its terminal
    /// catch-all matcher.
    #[error("No redirect path match for path={path:?}")]
    ChainExhausted { path: String },
}

impl AppError {
    /// Create an S3 error from any displayable source.
    pub fn s3(message: impl fmt::Display) -> Self {
        Self::S3(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a chain exhaustion error for the offending path.
    pub fn chain_exhausted(path: impl Into<String>) -> Self {
        Self::ChainExhausted { path: path.into() }
    }
}
