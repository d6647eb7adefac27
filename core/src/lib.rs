//! # Keystone Core
//!
//! Core domain layer for the Keystone authentication service.
//! This crate contains the identity and claims entities, the stateless JWT
//! token service, the credential-checking authentication service, the
//! credential store interface, and the error types shared by all of them.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
