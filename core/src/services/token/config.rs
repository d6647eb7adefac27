//! Configuration for the token service

use re_shared::JwtConfig;

use crate::domain::entities::token::DEFAULT_TOKEN_TTL_SECONDS;

/// Configuration for the token service
///
/// There is no `Default`: the signing secret has to come from the
/// environment or a settings file.
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// HMAC key for every issue/verify operation
    pub signing_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_seconds: i64,
}

impl TokenServiceConfig {
    /// Creates a configuration with the default 24 hour lifetime
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }

    /// Overrides the token lifetime
    pub fn with_ttl_seconds(mut self, seconds: i64) -> Self {
        self.token_ttl_seconds = seconds;
        self
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self::new(config.secret.clone()).with_ttl_seconds(config.token_ttl_seconds)
    }
}

// The secret must never end up in logs.
impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("signing_secret", &"<redacted>")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}
