//! User record as persisted by the external store.
//!
//! The record carries identity, the password hash and the role
//! associations. Role associations are plain names: they may point at
//! clients or roles that no longer exist in the host realm.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored association to a role owned by a client.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClientRoleRef {
    /// Client identifier (the OAuth `client_id`, not the internal id).
    pub client: String,
    /// Role name within the client.
    pub role: String,
}

impl ClientRoleRef {
    /// Creates a new client role reference.
    #[must_use]
    pub fn new(client: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            client: client.into(),
            role: role.into(),
        }
    }
}

/// A stored association to a realm-level role.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RealmRoleRef {
    /// Role name within the realm.
    pub role: String,
}

impl RealmRoleRef {
    /// Creates a new realm role reference.
    #[must_use]
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }
}

/// One user of the external store.
///
/// `id` is assigned once at registration and never changes. A present
/// `password_hash` is always a complete PHC string; `None` means no
/// password credential is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntity {
    // === Identity ===
    /// External identifier, unique within the store.
    pub id: String,
    /// Login name.
    pub username: String,

    // === Profile ===
    /// Email address.
    pub email: Option<String>,
    /// Whether the email has been verified.
    pub email_verified: bool,
    /// First name (dedicated column, exposed as the `firstName` attribute).
    pub first_name: Option<String>,
    /// Last name (dedicated column, exposed as the `lastName` attribute).
    pub last_name: Option<String>,

    // === Security ===
    /// Self-describing password hash.
    pub password_hash: Option<String>,

    /// Creation time in epoch milliseconds.
    pub created_timestamp: Option<i64>,

    // === Role Associations ===
    /// Client role associations.
    pub client_roles: BTreeSet<ClientRoleRef>,
    /// Realm role associations.
    pub realm_roles: BTreeSet<RealmRoleRef>,
}

impl UserEntity {
    /// Creates a record with only the identity populated.
    #[must_use]
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: None,
            email_verified: false,
            first_name: None,
            last_name: None,
            password_hash: None,
            created_timestamp: None,
            client_roles: BTreeSet::new(),
            realm_roles: BTreeSet::new(),
        }
    }

    /// Sets the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the first name.
    #[must_use]
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Sets the last name.
    #[must_use]
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    /// Sets the password hash.
    #[must_use]
    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Sets the creation timestamp (epoch milliseconds).
    #[must_use]
    pub const fn with_created_timestamp(mut self, millis: i64) -> Self {
        self.created_timestamp = Some(millis);
        self
    }

    /// Adds a client role association.
    #[must_use]
    pub fn with_client_role(mut self, client: impl Into<String>, role: impl Into<String>) -> Self {
        self.client_roles.insert(ClientRoleRef::new(client, role));
        self
    }

    /// Adds a realm role association.
    #[must_use]
    pub fn with_realm_role(mut self, role: impl Into<String>) -> Self {
        self.realm_roles.insert(RealmRoleRef::new(role));
        self
    }

    /// Creation time as a UTC timestamp.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_timestamp
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// Checks if a password credential is configured.
    #[must_use]
    pub const fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}
