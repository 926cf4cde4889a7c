//! Test fixtures shared by the integration tests.
//!
//! A [`Fixture`] wires the database provider to in-memory collaborators so
//! every test starts from a known realm and user table.

use std::sync::Arc;

use kc_federation::{FederationConfig, READ_ONLY_OPTION};
use kc_federation_db::{
    DbUserStorageProvider, DbUserStorageProviderFactory, PROVIDER_ID, PasswordPolicy, StoreSession,
};
use kc_model::UserEntity;
use kc_storage::RealmDirectory;
use kc_storage::memory::{InMemoryFederatedStorage, InMemoryRealm, InMemoryUserStore};

/// Initializes tracing once for the test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("kc_federation_db=debug")
        .with_test_writer()
        .try_init();
}

/// Cheap Argon2 parameters so tests hash quickly.
#[must_use]
pub fn fast_policy() -> PasswordPolicy {
    PasswordPolicy::new().memory_cost(1024).time_cost(1)
}

/// In-memory realm, user store and fallback storage.
pub struct Fixture {
    /// Realm clients and roles.
    pub realm: Arc<InMemoryRealm>,
    /// The external user table.
    pub users: Arc<InMemoryUserStore>,
    /// Fallback attribute and role storage.
    pub fallback: Arc<InMemoryFederatedStorage>,
    /// Session handed to providers.
    pub session: StoreSession,
}

impl Fixture {
    /// Creates a fixture with an empty user table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Creates a fixture with the given rows.
    #[must_use]
    pub fn with_users(users: Vec<UserEntity>) -> Self {
        init_tracing();

        let realm = Arc::new(InMemoryRealm::default());
        let users = Arc::new(InMemoryUserStore::with_users(users));
        let fallback = Arc::new(InMemoryFederatedStorage::new());
        let session = StoreSession::new(
            realm.clone(),
            users.clone(),
            fallback.clone(),
            fallback.clone(),
        );

        Self {
            realm,
            users,
            fallback,
            session,
        }
    }

    /// Builds a provider with the given raw `readOnly` option.
    ///
    /// ## Errors
    ///
    /// Returns an error if the configuration is rejected.
    pub fn provider(&self, read_only: Option<&str>) -> anyhow::Result<DbUserStorageProvider> {
        let mut builder = FederationConfig::builder()
            .realm_id(self.realm.realm_id())
            .provider_type(PROVIDER_ID)
            .name("legacy-db");
        if let Some(value) = read_only {
            builder = builder.config(READ_ONLY_OPTION, value);
        }

        Ok(DbUserStorageProviderFactory::new()
            .with_password_policy(fast_policy())
            .create(builder.build()?, self.session.clone()))
    }

    /// A provider that accepts writes.
    ///
    /// ## Errors
    ///
    /// Returns an error if the configuration is rejected.
    pub fn writable(&self) -> anyhow::Result<DbUserStorageProvider> {
        self.provider(Some("false"))
    }

    /// A provider with the default (read-only) configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error if the configuration is rejected.
    pub fn read_only(&self) -> anyhow::Result<DbUserStorageProvider> {
        self.provider(None)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
