//! Fallback storage for attributes without a dedicated column.

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StorageResult;

/// Host-side storage for custom attributes of federated users.
///
/// Keyed by realm and the composite (host-visible) user id.
#[async_trait]
pub trait FederatedAttributeStore: Send + Sync {
    /// Gets all attributes of a user.
    async fn attributes(
        &self,
        realm_id: Uuid,
        user_id: &str,
    ) -> StorageResult<HashMap<String, Vec<String>>>;

    /// Gets the values of one attribute (empty if absent).
    async fn attribute(
        &self,
        realm_id: Uuid,
        user_id: &str,
        name: &str,
    ) -> StorageResult<Vec<String>> {
        let mut attributes = self.attributes(realm_id, user_id).await?;
        Ok(attributes.remove(name).unwrap_or_default())
    }

    /// Replaces the values of one attribute.
    async fn set_attribute(
        &self,
        realm_id: Uuid,
        user_id: &str,
        name: &str,
        values: Vec<String>,
    ) -> StorageResult<()>;

    /// Removes one attribute.
    async fn remove_attribute(&self, realm_id: Uuid, user_id: &str, name: &str)
    -> StorageResult<()>;
}
