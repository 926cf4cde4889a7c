//! Resolution of stored role references.
//!
//! A user row keeps client roles as `(client id, role name)` pairs and
//! realm roles as names. Clients and roles can be deleted in the realm
//! while rows still point at them; such references are skipped with a
//! warning and never fail the lookup.

use kc_model::{ClientRoleRef, RealmRoleRef, Role};
use kc_storage::RealmDirectory;

/// Turns stored role references into the realm's role handles.
#[derive(Clone, Copy)]
pub struct RoleResolver<'a> {
    realm: &'a dyn RealmDirectory,
    user: &'a str,
}

impl<'a> RoleResolver<'a> {
    /// Creates a resolver. `user` only appears in warnings.
    #[must_use]
    pub fn new(realm: &'a dyn RealmDirectory, user: &'a str) -> Self {
        Self { realm, user }
    }

    /// Chains `base`, then resolved client roles, then resolved realm roles.
    ///
    /// Evaluation is lazy. Nothing is deduplicated: a role reachable both
    /// through `base` and a stored reference is yielded twice.
    pub fn resolve<B, C, R>(
        self,
        base: B,
        client_refs: C,
        realm_refs: R,
    ) -> impl Iterator<Item = Role>
    where
        B: IntoIterator<Item = Role>,
        C: IntoIterator<Item = &'a ClientRoleRef>,
        R: IntoIterator<Item = &'a RealmRoleRef>,
    {
        let client_roles = client_refs
            .into_iter()
            .filter_map(move |reference| self.resolve_client_role(reference));
        let realm_roles = realm_refs
            .into_iter()
            .filter_map(move |reference| self.resolve_realm_role(reference));

        base.into_iter().chain(client_roles).chain(realm_roles)
    }

    /// Resolves one client role reference.
    #[must_use]
    pub fn resolve_client_role(&self, reference: &ClientRoleRef) -> Option<Role> {
        let Some(client) = self.realm.client_by_client_id(&reference.client) else {
            tracing::warn!(
                user = %self.user,
                client = %reference.client,
                role = %reference.role,
                "Client does not exist; client role not assigned"
            );
            return None;
        };

        let role = self.realm.client_role(&client, &reference.role);
        if role.is_none() {
            tracing::warn!(
                user = %self.user,
                client = %reference.client,
                role = %reference.role,
                "Client role does not exist; client role not assigned"
            );
        }
        role
    }

    /// Resolves one realm role reference.
    #[must_use]
    pub fn resolve_realm_role(&self, reference: &RealmRoleRef) -> Option<Role> {
        let role = self.realm.realm_role(&reference.role);
        if role.is_none() {
            tracing::warn!(
                user = %self.user,
                role = %reference.role,
                "Realm role does not exist; realm role not assigned"
            );
        }
        role
    }
}
