//! Conversion between database rows and the user record.

use kc_model::{ClientRoleRef, RealmRoleRef, UserEntity};

use crate::entities::{ClientRoleRow, RealmRoleRow, UserRow};

impl From<ClientRoleRow> for ClientRoleRef {
    fn from(row: ClientRoleRow) -> Self {
        Self::new(row.client, row.role)
    }
}

impl From<RealmRoleRow> for RealmRoleRef {
    fn from(row: RealmRoleRow) -> Self {
        Self::new(row.role)
    }
}

/// Assembles a user record from its row and its role associations.
pub fn user_from_rows(
    row: UserRow,
    client_roles: Vec<ClientRoleRow>,
    realm_roles: Vec<RealmRoleRow>,
) -> UserEntity {
    UserEntity {
        id: row.id,
        username: row.username,
        email: row.email,
        email_verified: row.email_verified,
        first_name: row.first_name,
        last_name: row.last_name,
        password_hash: row.password_hash,
        created_timestamp: row.created_timestamp,
        client_roles: client_roles.into_iter().map(Into::into).collect(),
        realm_roles: realm_roles.into_iter().map(Into::into).collect(),
    }
}
