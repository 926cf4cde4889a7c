//! Shared fixtures for unit tests.

use std::sync::Arc;

use kc_model::UserEntity;
use kc_storage::memory::{InMemoryFederatedStorage, InMemoryRealm, InMemoryUserStore};

use crate::password::{PasswordHasherService, PasswordPolicy};
use crate::session::StoreSession;

pub(crate) struct Fixture {
    pub realm: Arc<InMemoryRealm>,
    pub users: Arc<InMemoryUserStore>,
    pub session: StoreSession,
}

impl Fixture {
    pub fn new(users: Vec<UserEntity>) -> Self {
        let realm = Arc::new(InMemoryRealm::default());
        let users = Arc::new(InMemoryUserStore::with_users(users));
        let fallback = Arc::new(InMemoryFederatedStorage::new());
        let session = StoreSession::new(realm.clone(), users.clone(), fallback.clone(), fallback);
        Self {
            realm,
            users,
            session,
        }
    }
}

pub(crate) fn fast_hasher() -> PasswordHasherService {
    PasswordHasherService::new(PasswordPolicy::new().memory_cost(1024).time_cost(1))
}
