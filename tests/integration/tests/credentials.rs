//! Credential integration tests.

use integration_tests::Fixture;
use kc_federation::{
    CredentialInputUpdater, CredentialInputValidator, UserLookupProvider, UserModel, UserView,
};
use kc_model::{CredentialInput, PASSWORD, UserEntity};
use kc_storage::UserEntityStore;

#[tokio::test]
async fn test_user_without_password() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![UserEntity::new("1", "alice")]);
    let provider = fixture.writable()?;
    let user = UserView::Live(provider.get_user_by_username("alice").await?.expect("alice"));

    assert!(provider.supports_credential_type(PASSWORD));
    assert!(!provider.is_configured_for(&user, PASSWORD));
    assert!(!provider.is_valid(&user, &CredentialInput::password("")));
    assert!(!provider.is_valid(&user, &CredentialInput::password("guess")));
    assert!(provider.disableable_credential_types(&user).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_update_then_validate() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![UserEntity::new("1", "alice")]);
    let provider = fixture.writable()?;
    let mut user = UserView::Live(provider.get_user_by_username("alice").await?.expect("alice"));

    for password in ["s3cret", "", "pässwörd with spaces"] {
        let updated = provider
            .update_credential(&mut user, &CredentialInput::password(password))
            .await?;
        assert!(updated);

        assert!(provider.is_valid(&user, &CredentialInput::password(password)));
        let wrong = format!("{password}x");
        assert!(!provider.is_valid(&user, &CredentialInput::password(wrong)));
    }

    // A fresh lookup sees the stored hash.
    let reloaded = UserView::Live(provider.get_user_by_id(user.id()).await?.expect("alice"));
    assert!(provider.is_configured_for(&reloaded, PASSWORD));
    assert!(provider.is_valid(&reloaded, &CredentialInput::password("pässwörd with spaces")));
    assert_eq!(provider.disableable_credential_types(&reloaded), [PASSWORD]);
    Ok(())
}

#[tokio::test]
async fn test_each_update_uses_fresh_salt() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![UserEntity::new("1", "alice")]);
    let provider = fixture.writable()?;
    let mut user = UserView::Live(provider.get_user_by_username("alice").await?.expect("alice"));
    let input = CredentialInput::password("same");

    provider.update_credential(&mut user, &input).await?;
    let first = fixture.users.get("1").and_then(|u| u.password_hash);
    provider.update_credential(&mut user, &input).await?;
    let second = fixture.users.get("1").and_then(|u| u.password_hash);

    assert!(first.is_some());
    assert_ne!(first, second);
    assert!(provider.is_valid(&user, &input));
    Ok(())
}

#[tokio::test]
async fn test_disable_password() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![UserEntity::new("1", "alice")]);
    let provider = fixture.writable()?;
    let mut user = UserView::Live(provider.get_user_by_username("alice").await?.expect("alice"));

    provider
        .update_credential(&mut user, &CredentialInput::password("pw"))
        .await?;
    provider.disable_credential_type(&mut user, PASSWORD).await?;

    assert!(!provider.is_configured_for(&user, PASSWORD));
    assert!(!provider.is_valid(&user, &CredentialInput::password("pw")));
    assert!(fixture.users.get("1").expect("row").password_hash.is_none());
    Ok(())
}

#[tokio::test]
async fn test_unsupported_kind_is_a_no_op() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![UserEntity::new("1", "alice")]);
    let provider = fixture.writable()?;
    let mut user = UserView::Live(provider.get_user_by_username("alice").await?.expect("alice"));
    let otp = CredentialInput::new("otp", "123456");

    assert!(!provider.supports_credential_type("otp"));
    assert!(!provider.update_credential(&mut user, &otp).await?);
    provider.disable_credential_type(&mut user, "otp").await?;
    assert!(!provider.is_valid(&user, &otp));
    assert!(!provider.is_configured_for(&user, "otp"));
    assert!(fixture.users.get("1").expect("row").password_hash.is_none());
    Ok(())
}

#[tokio::test]
async fn test_password_survives_write_through_second_lookup() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![UserEntity::new("1", "alice")]);
    let provider = fixture.writable()?;
    let mut first = UserView::Live(provider.get_user_by_username("alice").await?.expect("alice"));
    let mut second = provider.get_user_by_username("alice").await?.expect("alice");

    provider
        .update_credential(&mut first, &CredentialInput::password("pw"))
        .await?;
    second.set_email(Some("alice@example.com".to_string())).await?;

    let stored = fixture.users.get("1").expect("row");
    assert!(stored.password_hash.is_some());
    assert_eq!(stored.email.as_deref(), Some("alice@example.com"));

    let fresh = UserView::Live(provider.get_user_by_username("alice").await?.expect("alice"));
    assert!(provider.is_valid(&fresh, &CredentialInput::password("pw")));
    assert_eq!(fresh.email(), Some("alice@example.com"));
    Ok(())
}

#[tokio::test]
async fn test_rejected_write_leaves_row_and_adapter_alone() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(vec![UserEntity::new("1", "alice")]);
    let provider = fixture.writable()?;
    let mut stale = provider.get_user_by_username("alice").await?.expect("alice");

    // Row vanishes between lookup and write.
    assert!(fixture.users.remove("1").await?);

    let err = stale
        .set_email(Some("alice@example.com".to_string()))
        .await
        .expect_err("row is gone");
    assert!(err.is_storage_error());
    assert_eq!(stale.email(), None);
    assert!(fixture.users.get("1").is_none());
    Ok(())
}
