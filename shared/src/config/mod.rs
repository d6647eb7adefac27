//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing, token lifetime, password encoding and seeded users
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server binding

pub mod auth;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, PasswordEncoderKind, UserSeed};
pub use environment::{Environment, LoggingConfig};
pub use server::ServerConfig;

/// Errors raised while validating configuration at startup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {name}")]
    Missing { name: String },

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validate every section that can be misconfigured
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.jwt.validate(self.environment)?;
        self.server.validate()?;
        Ok(())
    }
}
