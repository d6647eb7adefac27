//! Identity entity representing an authenticatable principal.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A principal known to the credential store
///
/// The password hash is opaque to the token layer; only the password encoder
/// ever looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique username (an e-mail address in practice)
    pub username: String,

    /// Encoded password, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Granted authorities such as `ROLE_USER`
    pub authorities: BTreeSet<String>,
}

impl Identity {
    /// Creates a new identity
    pub fn new<I, S>(username: impl Into<String>, password_hash: impl Into<String>, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }

    /// Authorities in their sorted wire order
    pub fn authority_list(&self) -> Vec<String> {
        self.authorities.iter().cloned().collect()
    }
}
