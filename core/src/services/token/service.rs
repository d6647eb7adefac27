//! Main token service implementation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{
    Claims, ExtraClaims, CLAIM_EXPIRES_AT, CLAIM_SUBJECT, MAX_TOKEN_TTL_SECONDS,
};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Signing algorithm for every token
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Service for issuing and verifying stateless JWT tokens
///
/// Holds no mutable state; one instance is shared by every request.
pub struct TokenService {
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or a configuration error if the secret is empty
    /// or the lifetime is outside `1..=MAX_TOKEN_TTL_SECONDS`
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.signing_secret.is_empty() {
            return Err(DomainError::Configuration {
                message: "Token signing secret must not be empty".to_string(),
            });
        }
        if config.token_ttl_seconds <= 0 {
            return Err(DomainError::Configuration {
                message: "Token lifetime must be positive".to_string(),
            });
        }
        let ttl = Duration::try_seconds(config.token_ttl_seconds)
            .filter(|_| config.token_ttl_seconds <= MAX_TOKEN_TTL_SECONDS)
            .ok_or_else(|| DomainError::Configuration {
                message: format!(
                    "Token lifetime must not exceed {} seconds",
                    MAX_TOKEN_TTL_SECONDS
                ),
            })?;

        let encoding_key = EncodingKey::from_secret(config.signing_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.signing_secret.as_bytes());

        // Expiry is enforced by `is_expired`/`is_valid`, not by decoding.
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&[CLAIM_SUBJECT, CLAIM_EXPIRES_AT]);

        Ok(Self {
            ttl,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Token lifetime in seconds, as reported to clients
    pub fn expires_in(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Issues a token carrying only the reserved claims
    pub fn issue(&self, identity: &Identity) -> Result<String, DomainError> {
        self.issue_with_claims(identity, ExtraClaims::new())
    }

    /// Issues a token with additional claims
    ///
    /// Extra claims named `sub`, `authorities`, `iat` or `exp` are dropped in
    /// favour of the reserved values.
    pub fn issue_with_claims(
        &self,
        identity: &Identity,
        extra_claims: ExtraClaims,
    ) -> Result<String, DomainError> {
        self.issue_at(identity, extra_claims, Utc::now())
    }

    /// Issues a token as if at `issued_at`
    pub fn issue_at(
        &self,
        identity: &Identity,
        extra_claims: ExtraClaims,
        issued_at: DateTime<Utc>,
    ) -> Result<String, DomainError> {
        let claims = Claims::for_identity(identity, issued_at, self.ttl, extra_claims)
            .map_err(|e| {
                tracing::error!(error = %e, issued_at = %issued_at, "Token expiry out of range");
                e
            })?;
        let token = self.encode_jwt(&claims)?;
        tracing::debug!(subject = %claims.sub, exp = claims.exp, "Issued token");
        Ok(token)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(TOKEN_ALGORITHM);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to encode token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Decodes a token and verifies its signature
    ///
    /// Expiry is not checked here: an authentic but expired token parses
    /// successfully. Use [`Self::parse_live_claims`] or [`Self::is_valid`]
    /// when liveness matters.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims
    /// * `Err(TokenError::MalformedToken)` - Bad structure, algorithm or signature
    pub fn parse_claims(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::warn!(reason = ?e.kind(), "Rejected malformed token");
                DomainError::Token(TokenError::MalformedToken)
            })
    }

    /// Decodes a token and rejects it if it has expired
    pub fn parse_live_claims(&self, token: &str) -> Result<Claims, DomainError> {
        self.parse_live_claims_at(token, Utc::now())
    }

    /// Decodes a token and rejects it if it has expired at `now`
    pub fn parse_live_claims_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, DomainError> {
        let claims = self.parse_claims(token)?;
        if claims.is_expired_at(now) {
            tracing::debug!(subject = %claims.sub, exp = claims.exp, "Rejected expired token");
            return Err(DomainError::Token(TokenError::ExpiredToken));
        }
        Ok(claims)
    }

    /// Extracts the subject (username) from a token
    pub fn extract_subject(&self, token: &str) -> Result<String, DomainError> {
        Ok(self.parse_claims(token)?.sub)
    }

    /// Extracts the authorities from a token
    pub fn extract_authorities(&self, token: &str) -> Result<Vec<String>, DomainError> {
        Ok(self.parse_claims(token)?.authorities)
    }

    /// Extracts the expiry time from a token
    pub fn extract_expiration(&self, token: &str) -> Result<DateTime<Utc>, DomainError> {
        self.parse_claims(token)?
            .expires_at()
            .ok_or(DomainError::Token(TokenError::MalformedToken))
    }

    /// Checks whether the named claim is present and non-null
    pub fn has_claim(&self, token: &str, name: &str) -> Result<bool, DomainError> {
        Ok(self.parse_claims(token)?.has_claim(name))
    }

    /// Checks whether the token has expired
    pub fn is_expired(&self, token: &str) -> Result<bool, DomainError> {
        self.is_expired_at(token, Utc::now())
    }

    /// Checks whether the token has expired at `now`
    pub fn is_expired_at(&self, token: &str, now: DateTime<Utc>) -> Result<bool, DomainError> {
        Ok(self.parse_claims(token)?.is_expired_at(now))
    }

    /// Checks that the token belongs to `identity` and has not expired
    pub fn is_valid(&self, token: &str, identity: &Identity) -> Result<bool, DomainError> {
        self.is_valid_at(token, identity, Utc::now())
    }

    /// Checks that the token belongs to `identity` and has not expired at `now`
    pub fn is_valid_at(
        &self,
        token: &str,
        identity: &Identity,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        Ok(self.parse_claims(token)?.is_valid_for(identity, now))
    }
}
