//! # kc-storage-sql
//!
//! `SQLx`-based implementation of [`kc_storage::UserEntityStore`].
//!
//! The schema is a `users` table plus `client_roles` / `realm_roles` catalogues joined
//! through `users_to_client_roles` / `users_to_realm_roles`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod convert;
mod entities;
pub mod error;
pub mod pool;
pub mod user;

pub use pool::{PoolConfig, connect};
pub use user::PgUserEntityStore;
