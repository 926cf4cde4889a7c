//! Role mapping integration tests.

use integration_tests::Fixture;
use kc_federation::UserLookupProvider;
use kc_model::{Role, UserEntity};

fn names(roles: &[Role]) -> Vec<&str> {
    roles.iter().map(|role| role.name.as_str()).collect()
}

#[tokio::test]
async fn test_deleted_client_leaves_realm_role() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![
        UserEntity::new("1", "alice")
            .with_client_role("retired-app", "viewer")
            .with_realm_role("user"),
    ]);
    fixture.realm.add_realm_role("user");
    let provider = fixture.read_only()?;
    let alice = provider.get_user_by_username("alice").await?.expect("alice");

    let resolved: Vec<Role> = alice.resolve_role_mappings(Vec::new()).collect();

    assert_eq!(names(&resolved), ["user"]);
    Ok(())
}

#[tokio::test]
async fn test_client_removed_after_assignment() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![
        UserEntity::new("1", "alice")
            .with_client_role("app", "viewer")
            .with_realm_role("user"),
    ]);
    let app = fixture.realm.add_client("app");
    fixture.realm.add_client_role(&app, "viewer");
    fixture.realm.add_realm_role("user");
    let provider = fixture.read_only()?;
    let alice = provider.get_user_by_username("alice").await?.expect("alice");

    assert_eq!(names(&alice.role_mappings().await?), ["viewer", "user"]);

    fixture.realm.remove_client("app");
    assert_eq!(names(&alice.role_mappings().await?), ["user"]);

    fixture.realm.remove_realm_role("user");
    assert!(alice.role_mappings().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_order_and_duplicates() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![
        UserEntity::new("1", "alice")
            .with_realm_role("admin")
            .with_client_role("app", "editor")
            .with_client_role("app", "gone")
            .with_realm_role("missing"),
    ]);
    let app = fixture.realm.add_client("app");
    fixture.realm.add_client_role(&app, "editor");
    let admin = fixture.realm.add_realm_role("admin");
    let provider = fixture.writable()?;
    let mut alice = provider.get_user_by_username("alice").await?.expect("alice");

    // Granted through fallback storage and also referenced by the row.
    alice.grant_role(&admin).await?;

    assert_eq!(
        names(&alice.role_mappings().await?),
        ["admin", "editor", "admin"]
    );
    Ok(())
}

#[tokio::test]
async fn test_base_roles_come_first() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![UserEntity::new("1", "alice").with_realm_role("user")]);
    fixture.realm.add_realm_role("user");
    let host_role = Role::new_realm_role(uuid::Uuid::now_v7(), "from-host");
    let provider = fixture.read_only()?;
    let alice = provider.get_user_by_username("alice").await?.expect("alice");

    let resolved: Vec<Role> = alice.resolve_role_mappings(vec![host_role]).collect();

    assert_eq!(names(&resolved), ["from-host", "user"]);
    Ok(())
}
