use super::*;

/// Tests renaming one of the user's groups.
///
/// Expected: Ok(node) carrying the new name
#[tokio::test]
async fn renames_owned_group() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config::default();

    let user = factory::user::create_user(db).await?;
    let group = factory::server_group::create_server_group(db, user.id).await?;

    let node = ServerGroupService::new(db, &config)
        .update(user.id, group.id, Some("Staging".to_string()))
        .await?;

    assert_eq!(node.node_id, group.id);
    assert_eq!(node.label, "Staging");

    Ok(())
}

/// Tests renaming a group owned by someone else.
///
/// Expected: Err(ExpectationFailed) with the not-found message
#[tokio::test]
async fn rejects_foreign_group() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config::default();

    let owner = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    let group = factory::server_group::create_server_group(db, owner.id).await?;

    let result = ServerGroupService::new(db, &config)
        .update(other.id, group.id, Some("Mine".to_string()))
        .await;

    match result {
        Err(AppError::ExpectationFailed(msg)) => {
            assert_eq!(msg, "The specified server group could not be found.")
        }
        other => panic!("Expected ExpectationFailed, got {:?}", other),
    }

    Ok(())
}

/// Tests renaming a group to the name of another of the user's groups.
///
/// Expected: Err(BadRequest); keeping its own name is fine
#[tokio::test]
async fn rejects_duplicate_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config::default();

    let user = factory::user::create_user(db).await?;
    factory::server_group::ServerGroupFactory::new(db, user.id)
        .name("Servers")
        .build()
        .await?;
    let group = factory::server_group::ServerGroupFactory::new(db, user.id)
        .name("Other")
        .build()
        .await?;

    let service = ServerGroupService::new(db, &config);

    assert!(matches!(
        service
            .update(user.id, group.id, Some("Servers".to_string()))
            .await,
        Err(AppError::BadRequest(_))
    ));
    assert!(service
        .update(user.id, group.id, Some("Other".to_string()))
        .await
        .is_ok());

    Ok(())
}
