//! Error types for authentication and token handling
//!
//! Error messages here are for logs. User-facing messages are chosen in the
//! presentation layer.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Unknown subject: {username}")]
    UnknownSubject { username: String },

    #[error("Bad credentials")]
    BadCredentials,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Structurally invalid, wrong algorithm, or signature mismatch
    #[error("Malformed token")]
    MalformedToken,

    /// Authentic but past its expiry
    #[error("Token expired")]
    ExpiredToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
