//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};

/// Token type reported to clients
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

/// Authentication response returned after a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Signed JWT for API authentication
    pub access_token: String,

    /// Always `Bearer`
    pub token_type: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    /// Authorities encoded in the token
    pub authorities: Vec<String>,
}

impl AuthResponse {
    /// Creates a new authentication response
    pub fn new(access_token: String, expires_in: i64, authorities: Vec<String>) -> Self {
        Self {
            access_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
            expires_in,
            authorities,
        }
    }
}
