//! Collaborators a provider talks to during a request.

use std::fmt;
use std::sync::Arc;

use kc_storage::{FederatedAttributeStore, FederatedRoleStore, RealmDirectory, UserEntityStore};
use uuid::Uuid;

/// Handles to the realm and the stores, shared by a provider and every
/// adapter it creates.
#[derive(Clone)]
pub struct StoreSession {
    /// The realm's client and role registry.
    pub realm: Arc<dyn RealmDirectory>,
    /// The external user store.
    pub users: Arc<dyn UserEntityStore>,
    /// Fallback storage for attributes without a dedicated column.
    pub attributes: Arc<dyn FederatedAttributeStore>,
    /// Fallback storage for role mappings granted through the host.
    pub roles: Arc<dyn FederatedRoleStore>,
}

impl StoreSession {
    /// Creates a session.
    #[must_use]
    pub fn new(
        realm: Arc<dyn RealmDirectory>,
        users: Arc<dyn UserEntityStore>,
        attributes: Arc<dyn FederatedAttributeStore>,
        roles: Arc<dyn FederatedRoleStore>,
    ) -> Self {
        Self {
            realm,
            users,
            attributes,
            roles,
        }
    }

    /// Id of the realm this session serves.
    #[must_use]
    pub fn realm_id(&self) -> Uuid {
        self.realm.realm_id()
    }
}

impl fmt::Debug for StoreSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSession")
            .field("realm_id", &self.realm_id())
            .finish_non_exhaustive()
    }
}
