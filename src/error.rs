//! Error types for chirpdb
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using ChirpError
pub type Result<T> = std::result::Result<T, ChirpError>;

/// Unified error type for chirpdb operations
#[derive(Debug, Error)]
pub enum ChirpError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("user doesn't exist: {email}")]
    UserNotFound { email: String },

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ChirpError {
    /// Shorthand for a missing-user error
    pub fn user_not_found(email: impl Into<String>) -> Self {
        ChirpError::UserNotFound {
            email: email.into(),
        }
    }

    /// Whether this error means the referenced entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChirpError::UserNotFound { .. })
    }
}
