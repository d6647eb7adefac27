//! Main authentication service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::identity::Identity;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::password::PasswordEncoder;

/// Authentication service: credential checks at login, token resolution per request
pub struct AuthService<U>
where
    U: UserRepository,
{
    /// Credential store
    user_repository: Arc<U>,
    /// Password encoder matching the stored hashes
    password_encoder: Arc<dyn PasswordEncoder>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
}

impl<U> AuthService<U>
where
    U: UserRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Credential store
    /// * `password_encoder` - Encoder the stored password hashes were produced with
    /// * `token_service` - Service for JWT token management
    pub fn new(
        user_repository: Arc<U>,
        password_encoder: Arc<dyn PasswordEncoder>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_repository,
            password_encoder,
            token_service,
        }
    }

    /// Verify credentials and issue a token
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Signed token with its lifetime and authorities
    /// * `Err(AuthError::UnknownSubject)` - No identity with that username
    /// * `Err(AuthError::BadCredentials)` - Password does not match
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<AuthResponse> {
        let identity = self.load_identity(username).await?;

        if !self.password_matches(password, &identity).await? {
            tracing::info!(username = %username, "Authentication failed: bad credentials");
            return Err(AuthError::BadCredentials.into());
        }

        let token = self.token_service.issue(&identity)?;
        tracing::info!(username = %username, "Authentication succeeded");

        Ok(AuthResponse::new(
            token,
            self.token_service.expires_in(),
            identity.authority_list(),
        ))
    }

    /// Resolve the identity a bearer token was issued for
    pub async fn resolve(&self, token: &str) -> DomainResult<Identity> {
        self.resolve_at(token, Utc::now()).await
    }

    /// Resolve the identity a bearer token was issued for, as of `now`
    ///
    /// The token is parsed first, so forged or corrupted tokens are rejected
    /// before the credential store is consulted.
    pub async fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> DomainResult<Identity> {
        let claims = self.token_service.parse_claims(token)?;
        let identity = self.load_identity(&claims.sub).await?;

        if claims.is_expired_at(now) {
            tracing::debug!(username = %claims.sub, "Rejected expired token");
            return Err(DomainError::Token(TokenError::ExpiredToken));
        }

        Ok(identity)
    }

    // bcrypt is CPU-bound, so the comparison runs on the blocking pool.
    async fn password_matches(&self, raw_password: &str, identity: &Identity) -> DomainResult<bool> {
        let encoder = Arc::clone(&self.password_encoder);
        let raw_password = raw_password.to_owned();
        let password_hash = identity.password_hash.clone();

        tokio::task::spawn_blocking(move || encoder.matches(&raw_password, &password_hash))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Password check task failed");
                DomainError::Internal {
                    message: "Password check failed".to_string(),
                }
            })
    }

    async fn load_identity(&self, username: &str) -> DomainResult<Identity> {
        self.user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                tracing::info!(username = %username, "Unknown subject");
                AuthError::UnknownSubject {
                    username: username.to_string(),
                }
                .into()
            })
    }
}
