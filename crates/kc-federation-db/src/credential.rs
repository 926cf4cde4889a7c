//! Password credentials stored on the user row.
//!
//! ## NIST 800-53 Rev5: IA-5
//!
//! Only the PHC hash is stored. Plaintext values pass through
//! [`CredentialInput`] and are never logged.

use kc_federation::{FederationResult, ReadOnlyGuard, UserView};
use kc_model::{CredentialInput, PASSWORD};

use crate::adapter::{PASSWORD_HASH_CACHE_KEY, UserAdapter};
use crate::password::PasswordHasherService;

/// Validates, updates and disables the password of a stored user.
///
/// Reads prefer the hash a cached user carries under
/// [`PASSWORD_HASH_CACHE_KEY`] and fall back to the live adapter. Writes
/// always go to the live adapter.
#[derive(Debug, Clone)]
pub struct PasswordCredentials {
    hasher: PasswordHasherService,
    guard: ReadOnlyGuard,
}

impl PasswordCredentials {
    /// Creates the credential handler.
    #[must_use]
    pub const fn new(hasher: PasswordHasherService, guard: ReadOnlyGuard) -> Self {
        Self { hasher, guard }
    }

    /// Checks if `credential_type` is the password type.
    #[must_use]
    pub fn supports(&self, credential_type: &str) -> bool {
        credential_type == PASSWORD
    }

    /// The hash validation would use for this view.
    #[must_use]
    pub fn password_hash(user: &UserView<UserAdapter>) -> Option<&str> {
        user.cached_value(PASSWORD_HASH_CACHE_KEY)
            .or_else(|| user.live().and_then(UserAdapter::password_hash))
    }

    /// Checks if the user has a password.
    #[must_use]
    pub fn is_configured(&self, user: &UserView<UserAdapter>, credential_type: &str) -> bool {
        self.supports(credential_type) && Self::password_hash(user).is_some()
    }

    /// Checks a candidate password against the stored hash.
    ///
    /// `false` for unsupported input types and for users without a password.
    #[must_use]
    pub fn is_valid(&self, user: &UserView<UserAdapter>, input: &CredentialInput) -> bool {
        if !self.supports(&input.credential_type) {
            return false;
        }
        let Some(hash) = Self::password_hash(user) else {
            return false;
        };
        self.hasher.verify(&input.value, hash)
    }

    /// Hashes and stores a new password.
    ///
    /// Returns `Ok(false)` for unsupported input types.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::ReadOnly` when the provider is read-only,
    /// `FederationError::NoLiveDelegate` for a cached user without a live
    /// adapter, or the hashing or store error.
    pub async fn update(
        &self,
        user: &mut UserView<UserAdapter>,
        input: &CredentialInput,
    ) -> FederationResult<bool> {
        if !self.supports(&input.credential_type) {
            return Ok(false);
        }
        self.guard.check("update credential")?;

        let hash = self.hasher.hash(&input.value)?;
        user.as_mutable()?.set_password_hash(Some(hash)).await?;
        user.evict_cached(PASSWORD_HASH_CACHE_KEY);
        Ok(true)
    }

    /// Removes the password. Unsupported types are a no-op.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::ReadOnly` when the provider is read-only,
    /// `FederationError::NoLiveDelegate` for a cached user without a live
    /// adapter, or the store error.
    pub async fn disable(
        &self,
        user: &mut UserView<UserAdapter>,
        credential_type: &str,
    ) -> FederationResult<()> {
        if !self.supports(credential_type) {
            return Ok(());
        }
        self.guard.check("disable credential")?;

        user.as_mutable()?.set_password_hash(None).await?;
        user.evict_cached(PASSWORD_HASH_CACHE_KEY);
        Ok(())
    }

    /// `["password"]` when a password is configured, otherwise empty.
    #[must_use]
    pub fn disableable(&self, user: &UserView<UserAdapter>) -> Vec<String> {
        if Self::password_hash(user).is_some() {
            vec![PASSWORD.to_string()]
        } else {
            Vec::new()
        }
    }
}
