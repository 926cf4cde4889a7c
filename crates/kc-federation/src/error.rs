//! Federation error types.

use kc_storage::StorageError;
use thiserror::Error;

/// Errors that can occur during federation operations.
///
/// Lookups that find nothing are not errors: they return `Ok(None)`.
/// Dangling role references are logged and never surface here.
#[derive(Debug, Error)]
pub enum FederationError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider is read-only.
    #[error("Provider is read-only: cannot {0}")]
    ReadOnly(String),

    /// Operation not supported by this provider.
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// A cached user was asked for its live delegate but has none.
    #[error("No live delegate available for cached user {0}")]
    NoLiveDelegate(String),

    /// Hashing a password failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Storage error, propagated unmodified.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl FederationError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a read-only error.
    #[must_use]
    pub fn read_only(operation: impl Into<String>) -> Self {
        Self::ReadOnly(operation.into())
    }

    /// Creates a not supported error.
    #[must_use]
    pub fn not_supported(operation: impl Into<String>) -> Self {
        Self::NotSupported(operation.into())
    }

    /// Checks if this is a read-only error.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly(_))
    }

    /// Checks if this is a storage error.
    #[must_use]
    pub const fn is_storage_error(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Result type for federation operations.
pub type FederationResult<T> = Result<T, FederationError>;
