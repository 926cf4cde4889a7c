//! Composite user identifiers.
//!
//! Users served by a federation provider are known to the host as
//! `<provider-id>:<external-id>`. The provider strips the prefix before
//! querying its store and adds it back when handing users out.

use std::fmt;

/// A host-visible id for a federated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageId {
    provider_id: String,
    external_id: String,
}

impl StorageId {
    /// Creates a composite id for a federated user.
    #[must_use]
    pub fn new(provider_id: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            external_id: external_id.into(),
        }
    }

    /// Returns the external part of a host-visible id.
    ///
    /// Everything after the first `:` is the external id; an id without
    /// `:` is returned unchanged.
    #[must_use]
    pub fn external_id_of(id: &str) -> &str {
        id.split_once(':').map_or(id, |(_, external_id)| external_id)
    }
}

impl fmt::Display for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider_id, self.external_id)
    }
}
