//! External user store trait.

use std::fmt;

use async_trait::async_trait;
use kc_model::UserEntity;

use crate::error::StorageResult;

/// The relational store that owns user records.
///
/// Each call runs inside the caller's transaction; failures propagate
/// unchanged and the store performs no retries of its own.
#[async_trait]
pub trait UserEntityStore: Send + Sync {
    /// Gets a user by external ID.
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<UserEntity>>;

    /// Gets the first user with exactly this username.
    async fn find_by_username(&self, username: &str) -> StorageResult<Option<UserEntity>>;

    /// Gets the first user with exactly this email.
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<UserEntity>>;

    /// Inserts a new user.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if the ID is already taken.
    async fn insert(&self, user: &UserEntity) -> StorageResult<()>;

    /// Writes one column of an existing user, leaving the others as stored.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the user doesn't exist.
    async fn update_field(&self, id: &str, field: &UserField) -> StorageResult<()>;

    /// Removes a user. Returns `false` if no such user existed.
    async fn remove(&self, id: &str) -> StorageResult<bool>;

    /// Runs a pattern search, ordered by username ascending.
    async fn search(&self, criteria: &UserSearchCriteria) -> StorageResult<Vec<UserEntity>>;

    /// Counts all users.
    async fn count(&self) -> StorageResult<u64>;
}

/// A new value for one column of a user record.
#[derive(Clone, PartialEq, Eq)]
pub enum UserField {
    /// `username`
    Username(String),
    /// `email`
    Email(Option<String>),
    /// `email_verified`
    EmailVerified(bool),
    /// `password_hash`
    PasswordHash(Option<String>),
    /// `first_name`
    FirstName(Option<String>),
    /// `last_name`
    LastName(Option<String>),
    /// `created_timestamp`
    CreatedTimestamp(Option<i64>),
}

impl UserField {
    /// Column the value belongs to.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Username(_) => "username",
            Self::Email(_) => "email",
            Self::EmailVerified(_) => "email_verified",
            Self::PasswordHash(_) => "password_hash",
            Self::FirstName(_) => "first_name",
            Self::LastName(_) => "last_name",
            Self::CreatedTimestamp(_) => "created_timestamp",
        }
    }

    /// Writes the value into an in-memory record.
    pub fn apply(self, user: &mut UserEntity) {
        match self {
            Self::Username(v) => user.username = v,
            Self::Email(v) => user.email = v,
            Self::EmailVerified(v) => user.email_verified = v,
            Self::PasswordHash(v) => user.password_hash = v,
            Self::FirstName(v) => user.first_name = v,
            Self::LastName(v) => user.last_name = v,
            Self::CreatedTimestamp(v) => user.created_timestamp = v,
        }
    }
}

impl fmt::Debug for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PasswordHash(hash) => f
                .debug_tuple("PasswordHash")
                .field(&hash.as_ref().map(|_| "<redacted>"))
                .finish(),
            Self::Username(v) => f.debug_tuple("Username").field(v).finish(),
            Self::Email(v) => f.debug_tuple("Email").field(v).finish(),
            Self::EmailVerified(v) => f.debug_tuple("EmailVerified").field(v).finish(),
            Self::FirstName(v) => f.debug_tuple("FirstName").field(v).finish(),
            Self::LastName(v) => f.debug_tuple("LastName").field(v).finish(),
            Self::CreatedTimestamp(v) => f.debug_tuple("CreatedTimestamp").field(v).finish(),
        }
    }
}

/// Search criteria for users.
///
/// `pattern` uses SQL `LIKE` syntax (`%` any run, `_` one character).
/// It is matched against the lower-cased username, or against the email
/// as stored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserSearchCriteria {
    /// `LIKE` pattern.
    pub pattern: String,
    /// Offset for pagination.
    pub offset: Option<usize>,
    /// Maximum results to return.
    pub max_results: Option<usize>,
}

impl UserSearchCriteria {
    /// Creates criteria for a `LIKE` pattern.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            offset: None,
            max_results: None,
        }
    }

    /// Sets offset for pagination.
    #[must_use]
    pub const fn offset(mut self, offset: Option<usize>) -> Self {
        self.offset = offset;
        self
    }

    /// Sets maximum results.
    #[must_use]
    pub const fn max_results(mut self, max: Option<usize>) -> Self {
        self.max_results = max;
        self
    }
}
