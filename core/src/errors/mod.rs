//! Domain-specific error types and error handling.

mod types;


// Re-export all error types
pub use types::{AuthError, TokenError};

use re_shared::ConfigError;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// True for failures that must be reported as an authentication rejection
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, DomainError::Auth(_))
            || matches!(
                self,
                DomainError::Token(TokenError::MalformedToken | TokenError::ExpiredToken)
            )
    }
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        DomainError::Configuration {
            message: err.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
