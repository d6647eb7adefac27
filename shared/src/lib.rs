//! Shared configuration and common types for the Keystone server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (JWT, server, environment, logging)
//! - Error response structures and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, Environment, JwtConfig, LoggingConfig,
    PasswordEncoderKind, ServerConfig, UserSeed,
};
pub use errors::{error_codes, ErrorResponse};
