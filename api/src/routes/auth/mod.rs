//! Authentication route handlers
//!
//! Only login lives here. Tokens are stateless, so there is no refresh or
//! logout endpoint.

pub mod authenticate;

pub use authenticate::authenticate;
