//! User repository trait defining the credential store interface.
//!
//! The token layer never touches the store directly: the authentication
//! service looks identities up by username. Stores are populated once at
//! startup and only read afterwards.

use async_trait::async_trait;

use crate::domain::entities::identity::Identity;
use crate::errors::DomainError;

/// Repository trait for identity lookups
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use re_core::repositories::UserRepository;
/// use re_core::domain::entities::identity::Identity;
/// use re_core::errors::DomainError;
///
/// struct LdapUserRepository {
///     // directory connection
/// }
///
/// #[async_trait]
/// impl UserRepository for LdapUserRepository {
///     async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an identity by its username
    ///
    /// # Returns
    /// * `Ok(Some(Identity))` - Identity found
    /// * `Ok(None)` - No identity with that username
    /// * `Err(DomainError)` - Lookup failed
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, DomainError>;
}
