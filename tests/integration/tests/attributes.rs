//! Attribute overlay integration tests.

use integration_tests::Fixture;
use kc_federation::{UserLookupProvider, UserModel};
use kc_model::UserEntity;
use kc_storage::FederatedAttributeStore;

#[tokio::test]
async fn test_merged_attributes() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![UserEntity::new("1", "alice").with_last_name("Liddell")]);
    let provider = fixture.writable()?;
    let mut alice = provider.get_user_by_username("alice").await?.expect("alice");

    alice.set_single_attribute("department", "wonderland").await?;
    let attributes = alice.attributes().await?;

    assert_eq!(attributes["department"], ["wonderland"]);
    assert_eq!(attributes["lastName"], ["Liddell"]);
    // A null column is still listed, with no value.
    assert!(attributes.contains_key("firstName"));
    assert!(attributes["firstName"].is_empty());
    Ok(())
}

#[tokio::test]
async fn test_dedicated_names_route_to_columns() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![UserEntity::new("1", "alice")]);
    let provider = fixture.writable()?;
    let mut alice = provider.get_user_by_username("alice").await?.expect("alice");

    alice.set_single_attribute("firstName", "Alice").await?;

    let row = fixture.users.get("1").expect("row");
    assert_eq!(row.first_name.as_deref(), Some("Alice"));
    let fallback = fixture
        .fallback
        .attributes(fixture.session.realm_id(), alice.id())
        .await?;
    assert!(fallback.is_empty());

    // A fresh adapter reads the column.
    let reloaded = provider.get_user_by_id(alice.id()).await?.expect("alice");
    assert_eq!(
        reloaded.first_attribute("firstName").await?.as_deref(),
        Some("Alice")
    );
    Ok(())
}

#[tokio::test]
async fn test_fallback_attributes_keyed_by_composite_id() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![UserEntity::new("1", "alice")]);
    let provider = fixture.writable()?;
    let mut alice = provider.get_user_by_username("alice").await?.expect("alice");

    alice
        .set_attribute("groups", vec!["a".to_string(), "b".to_string()])
        .await?;

    let stored = fixture
        .fallback
        .attribute(fixture.session.realm_id(), alice.id(), "groups")
        .await?;
    assert_eq!(stored, ["a", "b"]);

    alice.remove_attribute("groups").await?;
    assert!(alice.attribute_values("groups").await?.is_empty());
    Ok(())
}
