//! Read-only gate integration tests.

use integration_tests::Fixture;
use kc_federation::{
    CredentialInputUpdater, FederationError, UserLookupProvider, UserRegistrationProvider,
    UserStorageProvider, UserView,
};
use kc_model::{CredentialInput, PASSWORD, UserEntity};

fn alice() -> UserEntity {
    UserEntity::new("1", "alice")
        .with_email("alice@example.com")
        .with_first_name("Alice")
        .with_realm_role("user")
}

fn assert_read_only<T: std::fmt::Debug>(result: Result<T, FederationError>) {
    match result {
        Err(FederationError::ReadOnly(_)) => {}
        other => panic!("expected read-only failure, got {other:?}"),
    }
}

#[test]
fn test_read_only_option_policy() -> anyhow::Result<()> {
    let fixture = Fixture::new();

    // Absent and the literal "true" are read-only; anything else is
    // writable, including "True". Kept as-is on purpose.
    assert!(fixture.provider(None)?.is_read_only());
    assert!(fixture.provider(Some("true"))?.is_read_only());
    assert!(!fixture.provider(Some("false"))?.is_read_only());
    assert!(!fixture.provider(Some("True"))?.is_read_only());
    assert!(!fixture.provider(Some(""))?.is_read_only());
    Ok(())
}

#[tokio::test]
async fn test_every_mutation_rejected_without_side_effects() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![alice()]);
    let provider = fixture.read_only()?;
    let admin = fixture.realm.add_realm_role("admin");
    let mut user = provider.get_user_by_username("alice").await?.expect("alice");

    assert_read_only(user.set_username("mallory").await);
    assert_read_only(user.set_email(None).await);
    assert_read_only(user.set_email_verified(true).await);
    assert_read_only(user.set_created_timestamp(Some(0)).await);
    assert_read_only(user.set_single_attribute("firstName", "Eve").await);
    assert_read_only(user.set_single_attribute("department", "x").await);
    assert_read_only(user.remove_attribute("lastName").await);
    assert_read_only(user.remove_attribute("department").await);
    assert_read_only(user.grant_role(&admin).await);
    assert_read_only(user.delete_role_mapping(&admin).await);

    let mut view = UserView::Live(user.clone());
    assert_read_only(
        provider
            .update_credential(&mut view, &CredentialInput::password("pw"))
            .await,
    );
    assert_read_only(provider.disable_credential_type(&mut view, PASSWORD).await);
    assert_read_only(provider.add_user("bob").await);
    assert_read_only(provider.remove_user(&view).await);

    assert_eq!(user.entity(), &alice());
    assert_eq!(fixture.users.get("1"), Some(alice()));
    assert_eq!(fixture.users.len(), 1);
    assert!(user.attribute_values("department").await?.is_empty());
    assert!(user.role_mappings().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_reads_allowed_when_read_only() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![alice()]);
    fixture.realm.add_realm_role("user");
    let provider = fixture.read_only()?;
    let user = provider.get_user_by_username("alice").await?.expect("alice");

    assert_eq!(user.attributes().await?["firstName"], ["Alice"]);
    assert_eq!(user.role_mappings().await?.len(), 1);
    Ok(())
}
