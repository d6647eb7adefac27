//! Claims carried inside a signed authentication token.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::TokenError;

use super::identity::Identity;

pub use re_shared::config::auth::{DEFAULT_TOKEN_TTL_SECONDS, MAX_TOKEN_TTL_SECONDS};

pub const CLAIM_SUBJECT: &str = "sub";
pub const CLAIM_AUTHORITIES: &str = "authorities";
pub const CLAIM_ISSUED_AT: &str = "iat";
pub const CLAIM_EXPIRES_AT: &str = "exp";

/// Claim names owned by the token service; caller-supplied extras never override them
pub const RESERVED_CLAIMS: [&str; 4] = [
    CLAIM_SUBJECT,
    CLAIM_AUTHORITIES,
    CLAIM_ISSUED_AT,
    CLAIM_EXPIRES_AT,
];

/// Caller-supplied claims merged into the token payload
pub type ExtraClaims = Map<String, Value>;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity username)
    pub sub: String,

    /// Authorities granted to the subject
    pub authorities: Vec<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Any additional claims supplied at issuance
    #[serde(flatten)]
    pub extra: ExtraClaims,
}

impl Claims {
    /// Creates claims for an identity
    ///
    /// # Arguments
    ///
    /// * `identity` - The identity the token is issued for
    /// * `issued_at` - Issue time; expiry is `issued_at + ttl`
    /// * `ttl` - Token lifetime
    /// * `extra` - Additional claims; entries named like a reserved claim are dropped
    ///
    /// # Returns
    ///
    /// A new `Claims` instance, or `TokenError::TokenGenerationFailed` when
    /// the expiry is not representable
    pub fn for_identity(
        identity: &Identity,
        issued_at: DateTime<Utc>,
        ttl: Duration,
        mut extra: ExtraClaims,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenError::TokenGenerationFailed)?;

        for name in RESERVED_CLAIMS {
            if extra.remove(name).is_some() {
                tracing::debug!(claim = name, "Dropping extra claim that collides with a reserved claim");
            }
        }

        Ok(Self {
            sub: identity.username.clone(),
            authorities: identity.authority_list(),
            iat: issued_at.timestamp(),
            exp: ceil_timestamp(expires_at),
            extra,
        })
    }

    /// Checks if the claims have expired at the given instant
    ///
    /// Expired iff `exp` is strictly before `now`, compared at full precision.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map_or(true, |exp| exp < now)
    }

    /// Checks that the claims belong to `identity` and are live at `now`
    pub fn is_valid_for(&self, identity: &Identity, now: DateTime<Utc>) -> bool {
        self.sub == identity.username && !self.is_expired_at(now)
    }

    /// Checks whether a claim is present and non-null
    pub fn has_claim(&self, name: &str) -> bool {
        match name {
            CLAIM_SUBJECT | CLAIM_AUTHORITIES | CLAIM_ISSUED_AT | CLAIM_EXPIRES_AT => true,
            other => self.extra.get(other).is_some_and(|value| !value.is_null()),
        }
    }

    /// Expiry time as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Whole-second timestamp, rounded up so a token never expires before `issued_at + ttl`
fn ceil_timestamp(instant: DateTime<Utc>) -> i64 {
    if instant.timestamp_subsec_nanos() > 0 {
        instant.timestamp() + 1
    } else {
        instant.timestamp()
    }
}
