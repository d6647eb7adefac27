//! Request middleware

pub mod auth;

pub use auth::{AuthContext, JwtAuth, TokenAuthenticator};
