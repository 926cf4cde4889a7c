//! Cached read-through projections of federated users.
//!
//! The host may keep a snapshot of a user between requests instead of
//! asking the provider again. Reads are served from the snapshot; any
//! mutation has to reach the live user behind it, which is why a view is
//! either [`UserView::Live`] or [`UserView::Cached`] and never both.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::{FederationError, FederationResult};
use crate::user::UserModel;

/// Snapshot of a user held by the host's user cache.
///
/// Besides the plain accessors, providers may publish extra values under
/// string keys (see `OnUserCache`) so later reads avoid a store query.
/// Published values may be secrets, so `Debug` lists their keys only.
#[derive(Clone)]
pub struct CachedUser<D> {
    id: String,
    username: String,
    email: Option<String>,
    email_verified: bool,
    first_name: Option<String>,
    last_name: Option<String>,
    created_timestamp: Option<i64>,
    cached_at: DateTime<Utc>,
    cached_with: HashMap<String, String>,
    delegate: Option<D>,
}

impl<D: UserModel> CachedUser<D> {
    /// Takes a snapshot of `user`. The snapshot has no live delegate.
    #[must_use]
    pub fn snapshot(user: &D) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            email: user.email().map(str::to_string),
            email_verified: user.is_email_verified(),
            first_name: user.first_name().map(str::to_string),
            last_name: user.last_name().map(str::to_string),
            created_timestamp: user.created_timestamp(),
            cached_at: Utc::now(),
            cached_with: HashMap::new(),
            delegate: None,
        }
    }
}

impl<D> CachedUser<D> {
    /// Returns a value a provider published into this snapshot.
    #[must_use]
    pub fn cached_value(&self, key: &str) -> Option<&str> {
        self.cached_with.get(key).map(String::as_str)
    }

    /// Publishes a value into this snapshot.
    pub fn put_cached(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.cached_with.insert(key.into(), value.into());
    }

    /// Drops a published value.
    pub fn evict(&mut self, key: &str) -> Option<String> {
        self.cached_with.remove(key)
    }

    /// Returns every published value.
    #[must_use]
    pub const fn cached_with(&self) -> &HashMap<String, String> {
        &self.cached_with
    }

    /// When the snapshot was taken.
    #[must_use]
    pub const fn cached_at(&self) -> DateTime<Utc> {
        self.cached_at
    }

    /// Attaches the live user this snapshot was taken from.
    pub fn attach_delegate(&mut self, delegate: D) {
        self.delegate = Some(delegate);
    }

    /// Builder form of [`Self::attach_delegate`].
    #[must_use]
    pub fn with_delegate(mut self, delegate: D) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Returns the live delegate, if one is attached.
    #[must_use]
    pub const fn delegate(&self) -> Option<&D> {
        self.delegate.as_ref()
    }

    /// Returns the live delegate for mutation.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::NoLiveDelegate` when the snapshot has no
    /// live user attached.
    pub fn delegate_for_update(&mut self) -> FederationResult<&mut D> {
        match self.delegate.as_mut() {
            Some(delegate) => Ok(delegate),
            None => Err(FederationError::NoLiveDelegate(self.id.clone())),
        }
    }
}

impl<D> UserModel for CachedUser<D> {
    fn id(&self) -> &str {
        &self.id
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn is_email_verified(&self) -> bool {
        self.email_verified
    }

    fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    fn created_timestamp(&self) -> Option<i64> {
        self.created_timestamp
    }
}

impl<D: fmt::Debug> fmt::Debug for CachedUser<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.cached_with.keys().map(String::as_str).collect();
        keys.sort_unstable();

        f.debug_struct("CachedUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("cached_at", &self.cached_at)
            .field("cached_keys", &keys)
            .field("delegate", &self.delegate)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// User View
// ============================================================================

/// What the host hands back to a provider: a live user or a cached one.
#[derive(Debug, Clone)]
pub enum UserView<D> {
    /// The provider's own live user.
    Live(D),
    /// A host cache entry, possibly carrying the live user.
    Cached(CachedUser<D>),
}

impl<D> UserView<D> {
    /// Unwraps to the live user so it can be mutated.
    ///
    /// ## Errors
    ///
    /// Returns `FederationError::NoLiveDelegate` for a cached view with no
    /// live user attached.
    pub fn as_mutable(&mut self) -> FederationResult<&mut D> {
        match self {
            Self::Live(user) => Ok(user),
            Self::Cached(cached) => cached.delegate_for_update(),
        }
    }

    /// Returns the live user, if reachable.
    #[must_use]
    pub const fn live(&self) -> Option<&D> {
        match self {
            Self::Live(user) => Some(user),
            Self::Cached(cached) => cached.delegate(),
        }
    }

    /// Returns the cached snapshot, if this is a cached view.
    #[must_use]
    pub const fn cached(&self) -> Option<&CachedUser<D>> {
        match self {
            Self::Live(_) => None,
            Self::Cached(cached) => Some(cached),
        }
    }

    /// Looks up a published cache value. Live views have none.
    #[must_use]
    pub fn cached_value(&self, key: &str) -> Option<&str> {
        self.cached().and_then(|cached| cached.cached_value(key))
    }

    /// Drops a published cache value. No-op for live views.
    pub fn evict_cached(&mut self, key: &str) {
        if let Self::Cached(cached) = self {
            cached.evict(key);
        }
    }

    /// Checks if this is a cached view.
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        matches!(self, Self::Cached(_))
    }
}

impl<D> From<CachedUser<D>> for UserView<D> {
    fn from(cached: CachedUser<D>) -> Self {
        Self::Cached(cached)
    }
}

impl<D: UserModel> UserModel for UserView<D> {
    fn id(&self) -> &str {
        match self {
            Self::Live(user) => user.id(),
            Self::Cached(cached) => cached.id(),
        }
    }

    fn username(&self) -> &str {
        match self {
            Self::Live(user) => user.username(),
            Self::Cached(cached) => cached.username(),
        }
    }

    fn email(&self) -> Option<&str> {
        match self {
            Self::Live(user) => user.email(),
            Self::Cached(cached) => cached.email(),
        }
    }

    fn is_email_verified(&self) -> bool {
        match self {
            Self::Live(user) => user.is_email_verified(),
            Self::Cached(cached) => cached.is_email_verified(),
        }
    }

    fn first_name(&self) -> Option<&str> {
        match self {
            Self::Live(user) => user.first_name(),
            Self::Cached(cached) => cached.first_name(),
        }
    }

    fn last_name(&self) -> Option<&str> {
        match self {
            Self::Live(user) => user.last_name(),
            Self::Cached(cached) => cached.last_name(),
        }
    }

    fn created_timestamp(&self) -> Option<i64> {
        match self {
            Self::Live(user) => user.created_timestamp(),
            Self::Cached(cached) => cached.created_timestamp(),
        }
    }
}
