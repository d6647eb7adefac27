//! Password encoders used to check credentials

use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use re_shared::PasswordEncoderKind;

use crate::errors::DomainError;

/// Encodes raw passwords for storage and checks them at login
pub trait PasswordEncoder: Send + Sync {
    /// Encode a raw password for storage
    fn encode(&self, raw_password: &str) -> Result<String, DomainError>;

    /// Check a raw password against a stored encoding
    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool;
}

/// Stores passwords verbatim. Only suitable for demos and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpPasswordEncoder;

impl PasswordEncoder for NoOpPasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, DomainError> {
        Ok(raw_password.to_string())
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        constant_time_eq(raw_password.as_bytes(), encoded_password.as_bytes())
    }
}

/// bcrypt-hashed passwords
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordEncoder {
    cost: u32,
}

impl BcryptPasswordEncoder {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordEncoder {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordEncoder for BcryptPasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, DomainError> {
        bcrypt::hash(raw_password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        match bcrypt::verify(raw_password, encoded_password) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password is not a valid bcrypt hash");
                false
            }
        }
    }
}

/// Build the encoder selected in configuration
pub fn encoder_for(kind: PasswordEncoderKind) -> Arc<dyn PasswordEncoder> {
    match kind {
        PasswordEncoderKind::Noop => Arc::new(NoOpPasswordEncoder),
        PasswordEncoderKind::Bcrypt => Arc::new(BcryptPasswordEncoder::default()),
    }
}
