//! Domain entities representing core business objects.

pub mod identity;
pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use identity::Identity;
pub use token::{
    Claims, ExtraClaims,
    DEFAULT_TOKEN_TTL_SECONDS, MAX_TOKEN_TTL_SECONDS, RESERVED_CLAIMS,
    CLAIM_AUTHORITIES, CLAIM_EXPIRES_AT, CLAIM_ISSUED_AT, CLAIM_SUBJECT,
};
