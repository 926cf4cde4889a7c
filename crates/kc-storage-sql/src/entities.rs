//! Database row types for `SQLx`.

use sqlx::FromRow;

/// Database row for users.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_timestamp: Option<i64>,
}

/// Client role association joined from `client_roles`.
#[derive(Debug, Clone, FromRow)]
pub struct ClientRoleRow {
    pub client: String,
    pub role: String,
}

/// Realm role association joined from `realm_roles`.
#[derive(Debug, Clone, FromRow)]
pub struct RealmRoleRow {
    pub role: String,
}
