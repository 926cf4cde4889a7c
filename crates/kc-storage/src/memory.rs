//! In-process implementations of the collaborator traits.
//!
//! Useful for embedding hosts and for tests. The user store implements
//! the same `LIKE` semantics as the SQL store so search behaves alike.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use kc_model::{Client, Role, UserEntity};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::attribute::FederatedAttributeStore;
use crate::error::{StorageError, StorageResult};
use crate::realm::RealmDirectory;
use crate::role::FederatedRoleStore;
use crate::user::{UserEntityStore, UserField, UserSearchCriteria};

// ============================================================================
// Pattern Matching
// ============================================================================

/// Matches `text` against a SQL `LIKE` pattern.
///
/// `%` matches any run of characters (including none), `_` matches
/// exactly one character. Matching is case-sensitive.
#[must_use]
pub fn like_matches(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '%' {
            backtrack = Some((p, t));
            p += 1;
        } else if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if let Some((star, mark)) = backtrack {
            p = star + 1;
            t = mark + 1;
            backtrack = Some((star, mark + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '%')
}

// ============================================================================
// User Store
// ============================================================================

/// In-memory user store.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<BTreeMap<String, UserEntity>>,
}

impl InMemoryUserStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with users.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = UserEntity>) -> Self {
        let users = users.into_iter().map(|u| (u.id.clone(), u)).collect();
        Self {
            users: RwLock::new(users),
        }
    }

    /// Returns a copy of the stored record, bypassing any adapter.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<UserEntity> {
        self.users.read().get(id).cloned()
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Checks if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    fn find_first(&self, matches: impl Fn(&UserEntity) -> bool) -> Option<UserEntity> {
        self.users.read().values().find(|u| matches(u)).cloned()
    }
}

#[async_trait]
impl UserEntityStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<UserEntity>> {
        Ok(self.get(id))
    }

    async fn find_by_username(&self, username: &str) -> StorageResult<Option<UserEntity>> {
        Ok(self.find_first(|u| u.username == username))
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<UserEntity>> {
        Ok(self.find_first(|u| u.email.as_deref() == Some(email)))
    }

    async fn insert(&self, user: &UserEntity) -> StorageResult<()> {
        let mut users = self.users.write();
        if users.contains_key(&user.id) {
            return Err(StorageError::duplicate("User", "id", user.id.clone()));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update_field(&self, id: &str, field: &UserField) -> StorageResult<()> {
        let mut users = self.users.write();
        match users.get_mut(id) {
            Some(existing) => {
                field.clone().apply(existing);
                Ok(())
            }
            None => Err(StorageError::not_found("User", id)),
        }
    }

    async fn remove(&self, id: &str) -> StorageResult<bool> {
        Ok(self.users.write().remove(id).is_some())
    }

    async fn search(&self, criteria: &UserSearchCriteria) -> StorageResult<Vec<UserEntity>> {
        let mut matched: Vec<UserEntity> = self
            .users
            .read()
            .values()
            .filter(|u| {
                like_matches(&criteria.pattern, &u.username.to_lowercase())
                    || u.email
                        .as_deref()
                        .is_some_and(|email| like_matches(&criteria.pattern, email))
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| a.username.cmp(&b.username));

        Ok(matched
            .into_iter()
            .skip(criteria.offset.unwrap_or(0))
            .take(criteria.max_results.unwrap_or(usize::MAX))
            .collect())
    }

    async fn count(&self) -> StorageResult<u64> {
        Ok(self.users.read().len() as u64)
    }
}

// ============================================================================
// Federated Fallback Storage
// ============================================================================

type UserKey = (Uuid, String);

/// In-memory fallback storage for attributes and role mappings.
#[derive(Debug, Default)]
pub struct InMemoryFederatedStorage {
    attributes: RwLock<HashMap<UserKey, HashMap<String, Vec<String>>>>,
    roles: RwLock<HashMap<UserKey, Vec<Role>>>,
}

impl InMemoryFederatedStorage {
    /// Creates empty fallback storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FederatedAttributeStore for InMemoryFederatedStorage {
    async fn attributes(
        &self,
        realm_id: Uuid,
        user_id: &str,
    ) -> StorageResult<HashMap<String, Vec<String>>> {
        Ok(self
            .attributes
            .read()
            .get(&(realm_id, user_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn set_attribute(
        &self,
        realm_id: Uuid,
        user_id: &str,
        name: &str,
        values: Vec<String>,
    ) -> StorageResult<()> {
        self.attributes
            .write()
            .entry((realm_id, user_id.to_string()))
            .or_default()
            .insert(name.to_string(), values);
        Ok(())
    }

    async fn remove_attribute(
        &self,
        realm_id: Uuid,
        user_id: &str,
        name: &str,
    ) -> StorageResult<()> {
        if let Some(attributes) = self
            .attributes
            .write()
            .get_mut(&(realm_id, user_id.to_string()))
        {
            attributes.remove(name);
        }
        Ok(())
    }
}

#[async_trait]
impl FederatedRoleStore for InMemoryFederatedStorage {
    async fn role_mappings(&self, realm_id: Uuid, user_id: &str) -> StorageResult<Vec<Role>> {
        Ok(self
            .roles
            .read()
            .get(&(realm_id, user_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn grant_role(&self, realm_id: Uuid, user_id: &str, role: &Role) -> StorageResult<()> {
        let mut roles = self.roles.write();
        let granted = roles.entry((realm_id, user_id.to_string())).or_default();
        if !granted.iter().any(|r| r.id == role.id) {
            granted.push(role.clone());
        }
        Ok(())
    }

    async fn delete_role_mapping(
        &self,
        realm_id: Uuid,
        user_id: &str,
        role: &Role,
    ) -> StorageResult<()> {
        if let Some(granted) = self.roles.write().get_mut(&(realm_id, user_id.to_string())) {
            granted.retain(|r| r.id != role.id);
        }
        Ok(())
    }
}

// ============================================================================
// Realm Directory
// ============================================================================

/// In-memory realm with clients, client roles and realm roles.
///
/// Entries can be removed after users reference them, which is how
/// dangling role associations come about.
#[derive(Debug)]
pub struct InMemoryRealm {
    id: Uuid,
    clients: RwLock<HashMap<String, Client>>,
    client_roles: RwLock<HashMap<Uuid, HashMap<String, Role>>>,
    realm_roles: RwLock<HashMap<String, Role>>,
}

impl Default for InMemoryRealm {
    fn default() -> Self {
        Self::new(Uuid::now_v7())
    }
}

impl InMemoryRealm {
    /// Creates an empty realm.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            clients: RwLock::new(HashMap::new()),
            client_roles: RwLock::new(HashMap::new()),
            realm_roles: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a client.
    pub fn add_client(&self, client_id: &str) -> Client {
        let client = Client::new(self.id, client_id);
        self.clients
            .write()
            .insert(client_id.to_string(), client.clone());
        client
    }

    /// Registers a role on a client.
    pub fn add_client_role(&self, client: &Client, name: &str) -> Role {
        let role = Role::new_client_role(self.id, client.id, name);
        self.client_roles
            .write()
            .entry(client.id)
            .or_default()
            .insert(name.to_string(), role.clone());
        role
    }

    /// Registers a realm role.
    pub fn add_realm_role(&self, name: &str) -> Role {
        let role = Role::new_realm_role(self.id, name);
        self.realm_roles
            .write()
            .insert(name.to_string(), role.clone());
        role
    }

    /// Removes a client together with its roles.
    pub fn remove_client(&self, client_id: &str) -> bool {
        let Some(client) = self.clients.write().remove(client_id) else {
            return false;
        };
        self.client_roles.write().remove(&client.id);
        true
    }

    /// Removes a role from a client.
    pub fn remove_client_role(&self, client: &Client, name: &str) -> bool {
        self.client_roles
            .write()
            .get_mut(&client.id)
            .is_some_and(|roles| roles.remove(name).is_some())
    }

    /// Removes a realm role.
    pub fn remove_realm_role(&self, name: &str) -> bool {
        self.realm_roles.write().remove(name).is_some()
    }
}

impl RealmDirectory for InMemoryRealm {
    fn realm_id(&self) -> Uuid {
        self.id
    }

    fn client_by_client_id(&self, client_id: &str) -> Option<Client> {
        self.clients.read().get(client_id).cloned()
    }

    fn client_role(&self, client: &Client, name: &str) -> Option<Role> {
        self.client_roles
            .read()
            .get(&client.id)
            .and_then(|roles| roles.get(name))
            .cloned()
    }

    fn realm_role(&self, name: &str) -> Option<Role> {
        self.realm_roles.read().get(name).cloned()
    }
}
