//! In-memory implementation of UserRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::identity::Identity;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Credential store backed by a map keyed on username
///
/// Filled once at construction and read-only afterwards, so lookups take no lock.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<HashMap<String, Identity>>,
}

impl InMemoryUserRepository {
    /// Create a repository holding the given identities
    ///
    /// Later entries with a duplicate username are ignored, so the first
    /// registration of a username is the one that authenticates.
    pub fn with_identities(identities: impl IntoIterator<Item = Identity>) -> Self {
        let mut users = HashMap::new();
        for identity in identities {
            if users.contains_key(&identity.username) {
                tracing::warn!(username = %identity.username, "Ignoring duplicate identity");
                continue;
            }
            users.insert(identity.username.clone(), identity);
        }
        Self {
            users: Arc::new(users),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, DomainError> {
        Ok(self.users.get(username).cloned())
    }
}
