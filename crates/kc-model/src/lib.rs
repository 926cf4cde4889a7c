//! # kc-model
//!
//! Domain records for the external user store federation provider.
//!
//! - [`UserEntity`] - one row of the external user store
//! - [`ClientRoleRef`] / [`RealmRoleRef`] - stored role associations
//! - [`Role`] / [`Client`] - live handles resolved from the host realm
//! - [`CredentialInput`] - a credential presented by the host

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod credential;
pub mod role;
pub mod user;

pub use client::Client;
pub use credential::{CredentialInput, PASSWORD};
pub use role::Role;
pub use user::{ClientRoleRef, RealmRoleRef, UserEntity};
