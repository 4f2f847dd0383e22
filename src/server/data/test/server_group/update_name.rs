use super::*;

/// Tests renaming a group.
///
/// Expected: Some with the new name
#[tokio::test]
async fn renames_group() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let group = factory::server_group::create_server_group(db, user.id).await?;

    let renamed = ServerGroupRepository::new(db)
        .update_name(group.id, "Renamed")
        .await?
        .unwrap();

    assert_eq!(renamed.id, group.id);
    assert_eq!(renamed.name, "Renamed");

    Ok(())
}

/// Tests renaming a missing group.
///
/// Expected: None
#[tokio::test]
async fn returns_none_for_missing_group() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ServerGroupRepository::new(db)
        .update_name(42, "Renamed")
        .await?;

    assert!(result.is_none());

    Ok(())
}
