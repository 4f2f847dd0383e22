use super::*;

/// Tests deleting a group that is not the user's first one.
///
/// Expected: Ok(()) and the group is gone
#[tokio::test]
async fn deletes_secondary_group() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config::default();

    let (user, _) = factory::helpers::create_user_with_default_group(db).await?;
    let group = factory::server_group::create_server_group(db, user.id).await?;

    let service = ServerGroupService::new(db, &config);
    service.delete(user.id, group.id).await?;

    assert!(matches!(
        service.properties(group.id).await,
        Err(AppError::Gone(_))
    ));

    Ok(())
}

/// Tests the user's first group cannot be deleted.
///
/// Expected: Err(ExpectationFailed)
#[tokio::test]
async fn refuses_default_group() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config::default();

    let (user, default_group) = factory::helpers::create_user_with_default_group(db).await?;

    let result = ServerGroupService::new(db, &config)
        .delete(user.id, default_group.id)
        .await;

    match result {
        Err(AppError::ExpectationFailed(msg)) => {
            assert_eq!(msg, "The specified server group cannot be deleted.")
        }
        other => panic!("Expected ExpectationFailed, got {:?}", other),
    }

    Ok(())
}

/// Tests a group holding a shared server cannot be deleted.
///
/// Expected: Err(ExpectationFailed) even for the owner
#[tokio::test]
async fn refuses_group_with_shared_server() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config::default();

    let (user, _) = factory::helpers::create_user_with_default_group(db).await?;
    let group = factory::server_group::create_server_group(db, user.id).await?;
    factory::server::ServerFactory::new(db, user.id, group.id)
        .shared(true)
        .build()
        .await?;

    let result = ServerGroupService::new(db, &config)
        .delete(user.id, group.id)
        .await;

    assert!(matches!(result, Err(AppError::ExpectationFailed(_))));

    Ok(())
}

/// Tests deleting another user's group.
///
/// Expected: Err(Gone)
#[tokio::test]
async fn refuses_foreign_group() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config::default();

    let (owner, _) = factory::helpers::create_user_with_default_group(db).await?;
    let (other, _) = factory::helpers::create_user_with_default_group(db).await?;
    let group = factory::server_group::create_server_group(db, owner.id).await?;

    let result = ServerGroupService::new(db, &config)
        .delete(other.id, group.id)
        .await;

    match result {
        Err(AppError::Gone(msg)) => {
            assert_eq!(msg, "The specified server group could not be found.")
        }
        other => panic!("Expected Gone, got {:?}", other),
    }

    Ok(())
}
