use super::*;

/// Tests ownership is part of the lookup.
///
/// Expected: Some for the owner, None for another user
#[tokio::test]
async fn finds_only_owned_group() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    let group = factory::server_group::create_server_group(db, owner.id).await?;

    let repo = ServerGroupRepository::new(db);

    assert!(repo.find_for_user(group.id, owner.id).await?.is_some());
    assert!(repo.find_for_user(group.id, other.id).await?.is_none());
    assert!(repo.find_by_id(group.id).await?.is_some());

    Ok(())
}
