//! End-to-End Integration Tests
//!
//! These tests drive the database user storage provider through the host
//! contract traits, against in-memory collaborators and (for the `postgres`
//! module) an ephemeral PostgreSQL instance via testcontainers.

mod attributes;
mod credentials;
mod lookup;
mod read_only;
mod roles;
mod search;
