//! User storage provider traits.
//!
//! ## NIST 800-53 Rev5 Controls
//!
//! - IA-2: Identification and Authentication (Organizational Users)
//! - IA-5: Authenticator Management
//!
//! These traits are the contract between the host identity system and a
//! federation provider serving users from an external store. Each concern
//! is a separate trait so a provider only implements what it supports.

use kc_model::CredentialInput;

use crate::cache::{CachedUser, UserView};
use crate::config::FederationConfig;
use crate::error::FederationResult;
use crate::user::UserModel;

// ============================================================================
// User Storage Provider
// ============================================================================

/// Base trait for user storage federation providers.
///
/// ## Implementation Notes
///
/// - Providers should be thread-safe (Send + Sync)
/// - All store access is async; lookups that find nothing return `Ok(None)`
/// - Mutations must fail with `FederationError::ReadOnly` before touching
///   any state when the provider is read-only
#[allow(async_fn_in_trait)]
pub trait UserStorageProvider: Send + Sync {
    /// Returns the provider configuration.
    fn config(&self) -> &FederationConfig;

    /// Returns the provider type identifier.
    fn provider_type(&self) -> &'static str;

    /// Checks if the provider rejects mutations.
    fn is_read_only(&self) -> bool;

    /// Closes the provider, releasing any resources.
    async fn close(&self) -> FederationResult<()> {
        Ok(())
    }
}

// ============================================================================
// Lookup
// ============================================================================

/// Exact-match user lookups.
#[allow(async_fn_in_trait)]
pub trait UserLookupProvider: UserStorageProvider {
    /// The live user type this provider hands out.
    type User: UserModel + Send + Sync;

    /// Gets a user by host-visible id (`<provider-id>:<external-id>`).
    async fn get_user_by_id(&self, id: &str) -> FederationResult<Option<Self::User>>;

    /// Gets a user by username.
    async fn get_user_by_username(&self, username: &str)
    -> FederationResult<Option<Self::User>>;

    /// Gets a user by email.
    async fn get_user_by_email(&self, email: &str) -> FederationResult<Option<Self::User>>;
}

// ============================================================================
// Query
// ============================================================================

/// Search parameters for [`UserQueryProvider::search_for_users`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    /// Search term; `*` is a wildcard. `None` matches every user.
    pub search: Option<String>,
    /// Number of results to skip.
    pub first: Option<usize>,
    /// Maximum number of results.
    pub max: Option<usize>,
}

impl UserQuery {
    /// Creates a query for a search term.
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    /// Creates a query matching every user.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Sets the number of results to skip.
    #[must_use]
    pub const fn first(mut self, first: usize) -> Self {
        self.first = Some(first);
        self
    }

    /// Sets the maximum number of results.
    #[must_use]
    pub const fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }
}

/// Counting and searching users.
#[allow(async_fn_in_trait)]
pub trait UserQueryProvider: UserLookupProvider {
    /// Counts all users in the external store.
    async fn users_count(&self) -> FederationResult<u64>;

    /// Searches users by username or email, ordered by username.
    async fn search_for_users(&self, query: &UserQuery) -> FederationResult<Vec<Self::User>>;
}

// ============================================================================
// Registration
// ============================================================================

/// Creating and removing users.
#[allow(async_fn_in_trait)]
pub trait UserRegistrationProvider: UserLookupProvider {
    /// Creates a user with only the username set.
    async fn add_user(&self, username: &str) -> FederationResult<Self::User>;

    /// Removes a user. Returns `false` if the user no longer exists.
    async fn remove_user(&self, user: &UserView<Self::User>) -> FederationResult<bool>;
}

// ============================================================================
// Credentials
// ============================================================================

/// Validates credentials against the external store.
///
/// ## NIST 800-53 Rev5: IA-5
///
/// Implementations must never log or store the plaintext value of a
/// credential input.
#[allow(async_fn_in_trait)]
pub trait CredentialInputValidator: UserLookupProvider {
    /// Checks if the provider handles a credential type.
    fn supports_credential_type(&self, credential_type: &str) -> bool;

    /// Checks if the user has a credential of the given type configured.
    fn is_configured_for(&self, user: &UserView<Self::User>, credential_type: &str) -> bool;

    /// Validates a credential input. Unsupported types validate as `false`.
    fn is_valid(&self, user: &UserView<Self::User>, input: &CredentialInput) -> bool;
}

/// Updates and disables credentials in the external store.
#[allow(async_fn_in_trait)]
pub trait CredentialInputUpdater: UserLookupProvider {
    /// Stores a new credential value.
    ///
    /// Returns `Ok(false)` for unsupported credential types.
    async fn update_credential(
        &self,
        user: &mut UserView<Self::User>,
        input: &CredentialInput,
    ) -> FederationResult<bool>;

    /// Removes the credential of the given type. Unsupported types are a no-op.
    async fn disable_credential_type(
        &self,
        user: &mut UserView<Self::User>,
        credential_type: &str,
    ) -> FederationResult<()>;

    /// Credential types that could currently be disabled for the user.
    fn disableable_credential_types(&self, user: &UserView<Self::User>) -> Vec<String>;
}

// ============================================================================
// Cache Hook
// ============================================================================

/// Called when the host builds a cached projection of a user.
pub trait OnUserCache: UserLookupProvider {
    /// Publishes provider data into the snapshot before it is cached.
    fn on_cache(&self, cached: &mut CachedUser<Self::User>, delegate: &Self::User);
}
