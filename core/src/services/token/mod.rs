//! Token service module for JWT management
//!
//! This module handles all token-related operations:
//! - Issuing HS256-signed tokens for an identity, with optional extra claims
//! - Verifying signatures and decoding claims
//! - Expiry and subject checks

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::{TokenService, TOKEN_ALGORITHM};
