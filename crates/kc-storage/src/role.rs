//! Fallback storage for role mappings.

use async_trait::async_trait;
use kc_model::Role;
use uuid::Uuid;

use crate::error::StorageResult;

/// Host-side storage for role mappings granted to federated users.
///
/// These mappings form the base of a user's role sequence; the
/// associations held by the external record are appended after them.
#[async_trait]
pub trait FederatedRoleStore: Send + Sync {
    /// Gets the roles mapped to a user.
    async fn role_mappings(&self, realm_id: Uuid, user_id: &str) -> StorageResult<Vec<Role>>;

    /// Grants a role to a user.
    async fn grant_role(&self, realm_id: Uuid, user_id: &str, role: &Role) -> StorageResult<()>;

    /// Removes a role mapping from a user.
    async fn delete_role_mapping(
        &self,
        realm_id: Uuid,
        user_id: &str,
        role: &Role,
    ) -> StorageResult<()>;
}
