//! Lookup integration tests.

use integration_tests::Fixture;
use kc_federation::{UserLookupProvider, UserModel};
use kc_model::UserEntity;

fn alice() -> UserEntity {
    UserEntity::new("7", "alice")
        .with_email("alice@example.com")
        .with_first_name("Alice")
        .with_created_timestamp(1_700_000_000_000)
}

#[tokio::test]
async fn test_lookup_by_composite_id() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![alice()]);
    let provider = fixture.read_only()?;
    let id = format!("{}:7", provider.provider_id());

    let user = provider.get_user_by_id(&id).await?.expect("user exists");

    assert_eq!(user.id(), id);
    assert_eq!(user.username(), "alice");
    assert_eq!(user.email(), Some("alice@example.com"));
    assert_eq!(user.first_name(), Some("Alice"));
    assert_eq!(user.last_name(), None);
    assert_eq!(user.created_timestamp(), Some(1_700_000_000_000));
    Ok(())
}

#[tokio::test]
async fn test_lookup_by_username_and_email() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![alice(), UserEntity::new("8", "bob")]);
    let provider = fixture.read_only()?;

    let by_name = provider.get_user_by_username("bob").await?.expect("bob");
    assert_eq!(by_name.external_id(), "8");

    let by_email = provider
        .get_user_by_email("alice@example.com")
        .await?
        .expect("alice");
    assert_eq!(by_email.external_id(), "7");
    Ok(())
}

#[tokio::test]
async fn test_lookup_is_exact_match() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![alice()]);
    let provider = fixture.read_only()?;

    assert!(provider.get_user_by_username("Alice").await?.is_none());
    assert!(provider.get_user_by_username("ali").await?.is_none());
    assert!(provider.get_user_by_email("ALICE@example.com").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_lookup_miss_is_absence() -> anyhow::Result<()> {
    let fixture = Fixture::new();
    let provider = fixture.read_only()?;

    let id = format!("{}:missing", provider.provider_id());
    assert!(provider.get_user_by_id(&id).await?.is_none());
    assert!(provider.get_user_by_username("nobody").await?.is_none());
    assert!(provider.get_user_by_email("nobody@example.com").await?.is_none());
    Ok(())
}
