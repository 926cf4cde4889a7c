//! # kc-federation-db
//!
//! User federation provider serving users from a relational store.
//!
//! Users live in the external store as [`kc_model::UserEntity`] rows. The
//! provider wraps each row in a [`UserAdapter`] which layers on:
//!
//! - attribute overlay: `firstName`/`lastName` map to dedicated columns,
//!   everything else goes to the host's fallback attribute storage
//! - role resolution: stored client and realm role references are resolved
//!   against the realm, skipping references that no longer resolve
//! - password credentials: Argon2id PHC hashes stored on the row
//! - the read-only gate, applied to every mutation
//!
//! ## Example
//!
//! ```ignore
//! let provider = DbUserStorageProviderFactory::new().create(config, session);
//! let user = provider.get_user_by_username("alice").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
pub mod credential;
pub mod factory;
pub mod password;
pub mod provider;
pub mod roles;
pub mod session;

#[cfg(test)]
mod testing;

pub use adapter::{DedicatedAttribute, PASSWORD_HASH_CACHE_KEY, UserAdapter};
pub use credential::PasswordCredentials;
pub use factory::{DbUserStorageProviderFactory, PROVIDER_ID};
pub use password::{PasswordHasherService, PasswordPolicy};
pub use provider::{DbUserStorageProvider, search_pattern};
pub use roles::RoleResolver;
pub use session::StoreSession;
