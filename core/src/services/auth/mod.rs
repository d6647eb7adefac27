//! Authentication service module
//!
//! This module provides:
//! - Credential verification and token issuance at login
//! - Bearer token resolution to a stored identity
//! - Password encoders (plain text and bcrypt)

mod password;
mod service;


pub use password::{encoder_for, BcryptPasswordEncoder, NoOpPasswordEncoder, PasswordEncoder};
pub use service::AuthService;
