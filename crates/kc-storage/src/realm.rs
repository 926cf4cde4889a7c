//! Read-only view of the host realm.

use kc_model::{Client, Role};
use uuid::Uuid;

/// The host realm's client and role registries.
///
/// Consulted only to turn stored role names into live role handles.
/// A `None` means the client or role does not exist (any more).
pub trait RealmDirectory: Send + Sync {
    /// Returns the realm ID.
    fn realm_id(&self) -> Uuid;

    /// Gets a client by its public `client_id`.
    fn client_by_client_id(&self, client_id: &str) -> Option<Client>;

    /// Gets a role of a client by name.
    fn client_role(&self, client: &Client, name: &str) -> Option<Role>;

    /// Gets a realm role by name.
    fn realm_role(&self, name: &str) -> Option<Role>;
}
