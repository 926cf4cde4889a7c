//! # kc-storage
//!
//! Interfaces to the collaborators the federation adapter depends on.
//!
//! ## Collaborator Traits
//!
//! - [`UserEntityStore`] - the external relational store holding user records
//! - [`FederatedAttributeStore`] - host fallback storage for custom attributes
//! - [`FederatedRoleStore`] - host fallback storage for role mappings
//! - [`RealmDirectory`] - read-only view of the host realm's clients and roles
//!
//! The [`memory`] module provides in-process implementations of all four.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod attribute;
pub mod error;
pub mod memory;
pub mod realm;
pub mod role;
pub mod user;

pub use attribute::FederatedAttributeStore;
pub use error::{StorageError, StorageResult};
pub use realm::RealmDirectory;
pub use role::FederatedRoleStore;
pub use user::{UserEntityStore, UserField, UserSearchCriteria};
