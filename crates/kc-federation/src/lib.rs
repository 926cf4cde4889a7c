//! # kc-federation
//!
//! User federation framework for Keycloak Rust.
//!
//! This crate provides the contract a federation provider fulfils towards
//! the host identity system, independent of where users are stored:
//!
//! - [`provider`] - lookup, query, registration, credential and cache traits
//! - [`config`] - provider configuration and its property descriptors
//! - [`guard`] - the read-only gate applied to every mutation
//! - [`storage_id`] - composite `<provider-id>:<external-id>` identifiers
//! - [`cache`] - cached read-through projections of users

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod error;
pub mod guard;
pub mod provider;
pub mod storage_id;
pub mod user;

pub use cache::{CachedUser, UserView};
pub use config::{ConfigProperty, ConfigPropertyType, FederationConfig};
pub use error::{FederationError, FederationResult};
pub use guard::{READ_ONLY_OPTION, ReadOnlyGuard};
pub use provider::{
    CredentialInputUpdater, CredentialInputValidator, OnUserCache, UserLookupProvider, UserQuery,
    UserQueryProvider, UserRegistrationProvider, UserStorageProvider,
};
pub use storage_id::StorageId;
pub use user::UserModel;
