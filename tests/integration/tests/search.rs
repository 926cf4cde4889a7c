//! Search integration tests.

use integration_tests::Fixture;
use kc_federation::{UserModel, UserQuery, UserQueryProvider};
use kc_federation_db::UserAdapter;
use kc_model::UserEntity;

fn users() -> Vec<UserEntity> {
    vec![
        UserEntity::new("1", "joanna").with_email("jo@example.com"),
        UserEntity::new("2", "Annabel").with_email("bel@example.com"),
        UserEntity::new("3", "bob").with_email("bob@annex.example"),
        UserEntity::new("4", "carol").with_email("Carol@Example.com"),
        UserEntity::new("5", "dave"),
    ]
}

fn usernames(users: &[UserAdapter]) -> Vec<&str> {
    users.iter().map(|user| user.username()).collect()
}

#[tokio::test]
async fn test_wildcards_are_implicit() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(users());
    let provider = fixture.read_only()?;

    let starred = provider.search_for_users(&UserQuery::search("*ann*")).await?;
    let plain = provider.search_for_users(&UserQuery::search("ann")).await?;

    assert_eq!(usernames(&starred), usernames(&plain));
    assert_eq!(usernames(&plain), ["Annabel", "bob", "joanna"]);
    Ok(())
}

#[tokio::test]
async fn test_username_match_ignores_case() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(users());
    let provider = fixture.read_only()?;

    let found = provider.search_for_users(&UserQuery::search("ANNA")).await?;
    assert_eq!(usernames(&found), ["Annabel", "joanna"]);
    Ok(())
}

#[tokio::test]
async fn test_email_match_is_case_sensitive() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(users());
    let provider = fixture.read_only()?;

    // The term is lower-cased, so a stored mixed-case email never matches.
    let found = provider
        .search_for_users(&UserQuery::search("Carol@Example"))
        .await?;
    assert!(found.is_empty());

    let found = provider
        .search_for_users(&UserQuery::search("@Example.com"))
        .await?;
    assert_eq!(usernames(&found), ["Annabel", "joanna"]);
    Ok(())
}

#[tokio::test]
async fn test_absent_term_matches_everyone_with_paging() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(users());
    let provider = fixture.read_only()?;

    let all = provider.search_for_users(&UserQuery::all()).await?;
    assert_eq!(
        usernames(&all),
        ["Annabel", "bob", "carol", "dave", "joanna"]
    );
    assert_eq!(provider.users_count().await?, 5);

    let page = provider
        .search_for_users(&UserQuery::all().first(1).max(2))
        .await?;
    assert_eq!(usernames(&page), ["bob", "carol"]);

    let tail = provider.search_for_users(&UserQuery::all().first(4)).await?;
    assert_eq!(usernames(&tail), ["joanna"]);
    Ok(())
}

#[tokio::test]
async fn test_inner_wildcard() -> anyhow::Result<()> {
    let fixture = Fixture::with_users(users());
    let provider = fixture.read_only()?;

    let found = provider.search_for_users(&UserQuery::search("j*na")).await?;
    assert_eq!(usernames(&found), ["joanna"]);
    Ok(())
}
