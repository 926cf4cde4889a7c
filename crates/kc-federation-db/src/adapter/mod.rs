//! Per-user view of a stored row.
//!
//! A [`UserAdapter`] serves reads from the row it was loaded from and
//! sends every change to the store as a single-column write. Other
//! adapters over the same user never have their writes replaced by a
//! stale row. The adapter's own row is updated only once the store has
//! accepted the write, so a rejected or failed write leaves it unchanged.

mod attributes;

use std::fmt;

use kc_federation::{FederationResult, ReadOnlyGuard, StorageId, UserModel};
use kc_model::{Role, UserEntity};
use kc_storage::UserField;
use uuid::Uuid;

use crate::roles::RoleResolver;
use crate::session::StoreSession;

pub use attributes::{DedicatedAttribute, FIRST_NAME, LAST_NAME};

/// Key under which the password hash is published into cached users.
pub const PASSWORD_HASH_CACHE_KEY: &str = "kc_federation_db::adapter::UserAdapter.passwordHash";

/// A stored user as seen by the host.
#[derive(Clone)]
pub struct UserAdapter {
    id: String,
    entity: UserEntity,
    session: StoreSession,
    guard: ReadOnlyGuard,
}

impl UserAdapter {
    /// Wraps a row loaded by the provider `provider_id`.
    #[must_use]
    pub fn new(
        session: StoreSession,
        provider_id: &str,
        entity: UserEntity,
        guard: ReadOnlyGuard,
    ) -> Self {
        let id = StorageId::new(provider_id, entity.id.as_str()).to_string();
        Self {
            id,
            entity,
            session,
            guard,
        }
    }

    /// The row as last read or written.
    #[must_use]
    pub const fn entity(&self) -> &UserEntity {
        &self.entity
    }

    /// Id of the row in the external store.
    #[must_use]
    pub fn external_id(&self) -> &str {
        &self.entity.id
    }

    /// Stored PHC password hash, if a password is configured.
    #[must_use]
    pub fn password_hash(&self) -> Option<&str> {
        self.entity.password_hash.as_deref()
    }

    /// The read-only gate this adapter checks.
    #[must_use]
    pub const fn guard(&self) -> ReadOnlyGuard {
        self.guard
    }

    fn realm_id(&self) -> Uuid {
        self.session.realm_id()
    }

    // === Guarded setters ===

    /// Changes the username.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::ReadOnly` when the provider is read-only,
    /// or the store error if the write fails.
    pub async fn set_username(&mut self, username: impl Into<String>) -> FederationResult<()> {
        self.persist("set username", UserField::Username(username.into())).await
    }

    /// Changes or clears the email address.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::ReadOnly` when the provider is read-only,
    /// or the store error if the write fails.
    pub async fn set_email(&mut self, email: Option<String>) -> FederationResult<()> {
        self.persist("set email", UserField::Email(email)).await
    }

    /// Marks the email as verified or not.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::ReadOnly` when the provider is read-only,
    /// or the store error if the write fails.
    pub async fn set_email_verified(&mut self, verified: bool) -> FederationResult<()> {
        self.persist("set email verified", UserField::EmailVerified(verified)).await
    }

    /// Changes the creation timestamp (epoch milliseconds).
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::ReadOnly` when the provider is read-only,
    /// or the store error if the write fails.
    pub async fn set_created_timestamp(&mut self, timestamp: Option<i64>) -> FederationResult<()> {
        self.persist("set created timestamp", UserField::CreatedTimestamp(timestamp)).await
    }

    pub(crate) async fn set_password_hash(&mut self, hash: Option<String>) -> FederationResult<()> {
        self.persist("update password", UserField::PasswordHash(hash)).await
    }

    async fn persist(&mut self, operation: &str, field: UserField) -> FederationResult<()> {
        self.guard.check(operation)?;
        self.session
            .users
            .update_field(&self.entity.id, &field)
            .await?;

        field.apply(&mut self.entity);
        Ok(())
    }

    // === Role mappings ===

    /// Appends the roles referenced by the row to `base`.
    ///
    /// See [`RoleResolver::resolve`] for ordering and dangling references.
    pub fn resolve_role_mappings<B>(&self, base: B) -> impl Iterator<Item = Role>
    where
        B: IntoIterator<Item = Role>,
    {
        RoleResolver::new(self.session.realm.as_ref(), &self.entity.username).resolve(
            base,
            &self.entity.client_roles,
            &self.entity.realm_roles,
        )
    }

    /// All role mappings: fallback grants, then stored client and realm roles.
    ///
    /// ## Errors
    ///
    /// Returns the store error if the fallback role store fails.
    pub async fn role_mappings(&self) -> FederationResult<Vec<Role>> {
        let base = self
            .session
            .roles
            .role_mappings(self.realm_id(), &self.id)
            .await?;
        Ok(self.resolve_role_mappings(base).collect())
    }

    /// Grants a role through the fallback role store.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::ReadOnly` when the provider is read-only,
    /// or the store error if the write fails.
    pub async fn grant_role(&mut self, role: &Role) -> FederationResult<()> {
        self.guard.check("grant role")?;
        self.session
            .roles
            .grant_role(self.realm_id(), &self.id, role)
            .await?;
        Ok(())
    }

    /// Removes a role granted through the fallback role store.
    ///
    /// Roles referenced by the row itself are not affected.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::ReadOnly` when the provider is read-only,
    /// or the store error if the write fails.
    pub async fn delete_role_mapping(&mut self, role: &Role) -> FederationResult<()> {
        self.guard.check("delete role mapping")?;
        self.session
            .roles
            .delete_role_mapping(self.realm_id(), &self.id, role)
            .await?;
        Ok(())
    }
}

impl UserModel for UserAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn username(&self) -> &str {
        &self.entity.username
    }

    fn email(&self) -> Option<&str> {
        self.entity.email.as_deref()
    }

    fn is_email_verified(&self) -> bool {
        self.entity.email_verified
    }

    fn first_name(&self) -> Option<&str> {
        self.entity.first_name.as_deref()
    }

    fn last_name(&self) -> Option<&str> {
        self.entity.last_name.as_deref()
    }

    fn created_timestamp(&self) -> Option<i64> {
        self.entity.created_timestamp
    }
}

impl fmt::Debug for UserAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAdapter")
            .field("id", &self.id)
            .field("username", &self.entity.username)
            .field("read_only", &self.guard.is_read_only())
            .finish_non_exhaustive()
    }
}
