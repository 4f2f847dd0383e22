use super::*;

/// Tests duplicate name detection per user.
///
/// Expected: true for the owner's existing name, false for other users and excluded ids
#[tokio::test]
async fn detects_duplicate_names_per_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    let repo = ServerGroupRepository::new(db);
    let group = repo.create(user.id, "Servers").await?;

    assert!(repo.exists_by_name(user.id, "Servers", None).await?);
    assert!(!repo.exists_by_name(other.id, "Servers", None).await?);
    assert!(!repo.exists_by_name(user.id, "Servers", Some(group.id)).await?);
    assert!(!repo.exists_by_name(user.id, "Staging", None).await?);

    Ok(())
}
