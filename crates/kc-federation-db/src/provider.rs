//! Provider facade over the relational user store.
//!
//! Turns host requests into store queries and wraps every row it returns
//! in a [`UserAdapter`]. Ids handed to the host are composite
//! (`<provider-id>:<external-id>`); the prefix is stripped before any
//! query.

use kc_federation::provider::{
    CredentialInputUpdater, CredentialInputValidator, OnUserCache, UserLookupProvider, UserQuery,
    UserQueryProvider, UserRegistrationProvider, UserStorageProvider,
};
use kc_federation::{
    CachedUser, FederationConfig, FederationResult, ReadOnlyGuard, StorageId, UserModel, UserView,
};
use kc_model::{CredentialInput, UserEntity};
use kc_storage::UserSearchCriteria;
use uuid::Uuid;

use crate::adapter::{PASSWORD_HASH_CACHE_KEY, UserAdapter};
use crate::credential::PasswordCredentials;
use crate::factory::PROVIDER_ID;
use crate::password::PasswordHasherService;
use crate::session::StoreSession;

/// Builds the store pattern for a search term.
///
/// The term is lower-cased, `*` becomes `%`, and the result is wrapped in
/// `%` on both sides. No term matches everything.
#[must_use]
pub fn search_pattern(term: Option<&str>) -> String {
    let term = term.unwrap_or_default().to_lowercase().replace('*', "%");
    format!("%{term}%")
}

/// User storage provider backed by a [`kc_storage::UserEntityStore`].
#[derive(Debug)]
pub struct DbUserStorageProvider {
    config: FederationConfig,
    provider_id: String,
    session: StoreSession,
    guard: ReadOnlyGuard,
    credentials: PasswordCredentials,
}

impl DbUserStorageProvider {
    /// Creates a provider with the default password policy.
    #[must_use]
    pub fn new(config: FederationConfig, session: StoreSession) -> Self {
        Self::with_hasher(config, session, PasswordHasherService::default())
    }

    /// Creates a provider with a specific password hasher.
    #[must_use]
    pub fn with_hasher(
        config: FederationConfig,
        session: StoreSession,
        hasher: PasswordHasherService,
    ) -> Self {
        let guard = ReadOnlyGuard::from_config(&config);
        Self {
            provider_id: config.id.to_string(),
            config,
            session,
            guard,
            credentials: PasswordCredentials::new(hasher, guard),
        }
    }

    /// Prefix of every user id this provider hands out.
    #[must_use]
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// The collaborators this provider queries.
    #[must_use]
    pub const fn session(&self) -> &StoreSession {
        &self.session
    }

    fn adapt(&self, entity: UserEntity) -> UserAdapter {
        UserAdapter::new(self.session.clone(), &self.provider_id, entity, self.guard)
    }
}

impl UserStorageProvider for DbUserStorageProvider {
    fn config(&self) -> &FederationConfig {
        &self.config
    }

    fn provider_type(&self) -> &'static str {
        PROVIDER_ID
    }

    fn is_read_only(&self) -> bool {
        self.guard.is_read_only()
    }
}

impl UserLookupProvider for DbUserStorageProvider {
    type User = UserAdapter;

    async fn get_user_by_id(&self, id: &str) -> FederationResult<Option<UserAdapter>> {
        let external_id = StorageId::external_id_of(id);
        let entity = self.session.users.find_by_id(external_id).await?;

        if entity.is_none() {
            tracing::info!(id = %id, "Could not find user by id");
        }
        Ok(entity.map(|entity| self.adapt(entity)))
    }

    async fn get_user_by_username(&self, username: &str) -> FederationResult<Option<UserAdapter>> {
        let entity = self.session.users.find_by_username(username).await?;

        if entity.is_none() {
            tracing::info!(username = %username, "Could not find user by username");
        }
        Ok(entity.map(|entity| self.adapt(entity)))
    }

    async fn get_user_by_email(&self, email: &str) -> FederationResult<Option<UserAdapter>> {
        let entity = self.session.users.find_by_email(email).await?;
        Ok(entity.map(|entity| self.adapt(entity)))
    }
}

impl UserQueryProvider for DbUserStorageProvider {
    async fn users_count(&self) -> FederationResult<u64> {
        Ok(self.session.users.count().await?)
    }

    async fn search_for_users(&self, query: &UserQuery) -> FederationResult<Vec<UserAdapter>> {
        let pattern = search_pattern(query.search.as_deref());
        tracing::debug!(
            pattern = %pattern,
            first = ?query.first,
            max = ?query.max,
            "Searching users"
        );

        let criteria = UserSearchCriteria::new(pattern)
            .offset(query.first)
            .max_results(query.max);
        let entities = self.session.users.search(&criteria).await?;

        Ok(entities
            .into_iter()
            .map(|entity| self.adapt(entity))
            .collect())
    }
}

impl UserRegistrationProvider for DbUserStorageProvider {
    async fn add_user(&self, username: &str) -> FederationResult<UserAdapter> {
        self.guard.check("add user")?;

        let entity = UserEntity::new(Uuid::now_v7().to_string(), username);
        self.session.users.insert(&entity).await?;

        tracing::info!(username = %username, id = %entity.id, "Added user");
        Ok(self.adapt(entity))
    }

    async fn remove_user(&self, user: &UserView<UserAdapter>) -> FederationResult<bool> {
        self.guard.check("remove user")?;

        let external_id = StorageId::external_id_of(user.id());
        let removed = self.session.users.remove(external_id).await?;

        if removed {
            tracing::info!(id = %user.id(), "Removed user");
        }
        Ok(removed)
    }
}

impl CredentialInputValidator for DbUserStorageProvider {
    fn supports_credential_type(&self, credential_type: &str) -> bool {
        self.credentials.supports(credential_type)
    }

    fn is_configured_for(&self, user: &UserView<UserAdapter>, credential_type: &str) -> bool {
        self.credentials.is_configured(user, credential_type)
    }

    fn is_valid(&self, user: &UserView<UserAdapter>, input: &CredentialInput) -> bool {
        self.credentials.is_valid(user, input)
    }
}

impl CredentialInputUpdater for DbUserStorageProvider {
    async fn update_credential(
        &self,
        user: &mut UserView<UserAdapter>,
        input: &CredentialInput,
    ) -> FederationResult<bool> {
        self.credentials.update(user, input).await
    }

    async fn disable_credential_type(
        &self,
        user: &mut UserView<UserAdapter>,
        credential_type: &str,
    ) -> FederationResult<()> {
        self.credentials.disable(user, credential_type).await
    }

    fn disableable_credential_types(&self, user: &UserView<UserAdapter>) -> Vec<String> {
        self.credentials.disableable(user)
    }
}

impl OnUserCache for DbUserStorageProvider {
    fn on_cache(&self, cached: &mut CachedUser<UserAdapter>, delegate: &UserAdapter) {
        if let Some(hash) = delegate.password_hash() {
            tracing::debug!(id = %delegate.id(), "Publishing password hash to user cache");
            cached.put_cached(PASSWORD_HASH_CACHE_KEY, hash);
        }
    }
}
