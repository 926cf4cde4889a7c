//! `PostgreSQL` implementation of the user entity store.

use async_trait::async_trait;
use kc_model::UserEntity;
use kc_storage::error::StorageResult;
use kc_storage::user::{UserEntityStore, UserField, UserSearchCriteria};
use kc_storage::StorageError;
use sqlx::{PgConnection, PgPool};

use crate::convert::user_from_rows;
use crate::entities::{ClientRoleRow, RealmRoleRow, UserRow};
use crate::error::from_sqlx_error;

/// `PostgreSQL` user entity store.
#[derive(Debug, Clone)]
pub struct PgUserEntityStore {
    pool: PgPool,
}

impl PgUserEntityStore {
    /// Creates a new `PostgreSQL` user store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads the role associations of a row and assembles the record.
    async fn load(&self, row: UserRow) -> StorageResult<UserEntity> {
        let client_roles: Vec<ClientRoleRow> = sqlx::query_as(
            r"SELECT cr.client, cr.role FROM client_roles cr
            JOIN users_to_client_roles ucr ON ucr.client_role_id = cr.id
            WHERE ucr.user_id = $1",
        )
        .bind(&row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        let realm_roles: Vec<RealmRoleRow> = sqlx::query_as(
            r"SELECT rr.role FROM realm_roles rr
            JOIN users_to_realm_roles urr ON urr.realm_role_id = rr.id
            WHERE urr.user_id = $1",
        )
        .bind(&row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        Ok(user_from_rows(row, client_roles, realm_roles))
    }

    async fn load_optional(&self, row: Option<UserRow>) -> StorageResult<Option<UserEntity>> {
        match row {
            Some(r) => Ok(Some(self.load(r).await?)),
            None => Ok(None),
        }
    }

    /// Writes the join rows of a freshly inserted user.
    ///
    /// Associations naming a catalogue entry that does not exist are
    /// silently dropped by the `INSERT .. SELECT`.
    async fn save_role_refs(conn: &mut PgConnection, user: &UserEntity) -> StorageResult<()> {
        for r in &user.client_roles {
            sqlx::query(
                r"INSERT INTO users_to_client_roles (user_id, client_role_id)
                SELECT $1, id FROM client_roles WHERE client = $2 AND role = $3",
            )
            .bind(&user.id)
            .bind(&r.client)
            .bind(&r.role)
            .execute(&mut *conn)
            .await
            .map_err(from_sqlx_error)?;
        }

        for r in &user.realm_roles {
            sqlx::query(
                r"INSERT INTO users_to_realm_roles (user_id, realm_role_id)
                SELECT $1, id FROM realm_roles WHERE role = $2",
            )
            .bind(&user.id)
            .bind(&r.role)
            .execute(&mut *conn)
            .await
            .map_err(from_sqlx_error)?;
        }

        Ok(())
    }
}

#[async_trait]
impl UserEntityStore for PgUserEntityStore {
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<UserEntity>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        self.load_optional(row).await
    }

    async fn find_by_username(&self, username: &str) -> StorageResult<Option<UserEntity>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT * FROM users WHERE username = $1 LIMIT 1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(from_sqlx_error)?;

        self.load_optional(row).await
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<UserEntity>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1 LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        self.load_optional(row).await
    }

    async fn insert(&self, user: &UserEntity) -> StorageResult<()> {
        let mut tx = self.pool.begin().await.map_err(from_sqlx_error)?;

        sqlx::query(
            r"INSERT INTO users (
                id, username, email, email_verified, password_hash,
                first_name, last_name, created_timestamp
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.email_verified)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.created_timestamp)
        .execute(&mut *tx)
        .await
        .map_err(from_sqlx_error)?;

        Self::save_role_refs(&mut *tx, user).await?;

        tx.commit().await.map_err(from_sqlx_error)
    }

    async fn update_field(&self, id: &str, field: &UserField) -> StorageResult<()> {
        // Column names come from a closed set, never from input
        let sql = format!("UPDATE users SET {} = $2 WHERE id = $1", field.column());
        let query = sqlx::query(&sql).bind(id);
        let query = match field {
            UserField::Username(v) => query.bind(v),
            UserField::Email(v)
            | UserField::PasswordHash(v)
            | UserField::FirstName(v)
            | UserField::LastName(v) => query.bind(v),
            UserField::EmailVerified(v) => query.bind(*v),
            UserField::CreatedTimestamp(v) => query.bind(*v),
        };

        let result = query
            .execute(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("User", id));
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> StorageResult<bool> {
        // Join rows go by cascade
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, criteria: &UserSearchCriteria) -> StorageResult<Vec<UserEntity>> {
        #[allow(clippy::cast_possible_wrap)]
        let offset = criteria.offset.map(|o| o as i64);
        #[allow(clippy::cast_possible_wrap)]
        let limit = criteria.max_results.map(|m| m as i64);

        tracing::debug!(pattern = %criteria.pattern, ?offset, ?limit, "searching users");

        // NULL offset/limit behave as if the clause were absent
        let rows: Vec<UserRow> = sqlx::query_as(
            r"SELECT * FROM users
            WHERE lower(username) LIKE $1 OR email LIKE $1
            ORDER BY username
            OFFSET $2 LIMIT $3",
        )
        .bind(&criteria.pattern)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            users.push(self.load(row).await?);
        }

        Ok(users)
    }

    async fn count(&self) -> StorageResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        #[allow(clippy::cast_sign_loss)]
        Ok(count as u64)
    }
}
