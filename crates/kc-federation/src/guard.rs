//! Read-only gate for federated users.

use crate::config::FederationConfig;
use crate::error::{FederationError, FederationResult};

/// Configuration key of the read-only option.
pub const READ_ONLY_OPTION: &str = "readOnly";

/// Gate checked by every mutating operation before it touches state.
///
/// Computed once from configuration and copied into each adapter; it
/// never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOnlyGuard {
    read_only: bool,
}

impl ReadOnlyGuard {
    /// Creates a guard with an explicit state.
    #[must_use]
    pub const fn new(read_only: bool) -> Self {
        Self { read_only }
    }

    /// Derives the guard from the raw `readOnly` option.
    ///
    /// Read-only unless the option is present with a value other than
    /// the literal `"true"`. An absent option is read-only, and so is
    /// `"true"`; `"false"`, `"True"` or `""` are all writable.
    #[must_use]
    pub fn from_option(value: Option<&str>) -> Self {
        Self::new(value.is_none_or(|v| v == "true"))
    }

    /// Derives the guard from provider configuration.
    #[must_use]
    pub fn from_config(config: &FederationConfig) -> Self {
        Self::from_option(config.get(READ_ONLY_OPTION))
    }

    /// Checks if mutations are rejected.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Fails with `FederationError::ReadOnly` when mutations are rejected.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::ReadOnly` naming `operation`.
    pub fn check(&self, operation: &str) -> FederationResult<()> {
        if self.read_only {
            return Err(FederationError::read_only(operation));
        }
        Ok(())
    }
}
