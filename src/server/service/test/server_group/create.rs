use super::*;

/// Tests creating a group returns its browser node.
///
/// Expected: Ok(node) labelled with the name, deletable
#[tokio::test]
async fn creates_group_node() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config::default();

    let user = factory::user::create_user(db).await?;

    let node = ServerGroupService::new(db, &config)
        .create(user.id, Some("Production".to_string()))
        .await?;

    assert_eq!(node.label, "Production");
    assert_eq!(node.node_type, SERVER_GROUP_NODE);
    assert_eq!(node.icon, "icon-server_group");
    assert!(node.inode);
    assert_eq!(node.extra.get("can_delete"), Some(&serde_json::json!(true)));

    Ok(())
}

/// Tests creating a group without a name.
///
/// Expected: Err(ExpectationFailed) for missing and blank names
#[tokio::test]
async fn rejects_missing_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config::default();

    let user = factory::user::create_user(db).await?;
    let service = ServerGroupService::new(db, &config);

    for name in [None, Some("  ".to_string())] {
        match service.create(user.id, name).await {
            Err(AppError::ExpectationFailed(msg)) => {
                assert_eq!(msg, "No server group name was specified")
            }
            other => panic!("Expected ExpectationFailed, got {:?}", other),
        }
    }

    Ok(())
}

/// Tests creating a group with a name the user already uses.
///
/// Expected: Err(BadRequest), while another user may reuse the name
#[tokio::test]
async fn rejects_duplicate_name_per_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config::default();

    let user = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    factory::server_group::ServerGroupFactory::new(db, user.id)
        .name("Servers")
        .build()
        .await?;

    let service = ServerGroupService::new(db, &config);

    match service.create(user.id, Some("Servers".to_string())).await {
        Err(AppError::BadRequest(msg)) => {
            assert_eq!(msg, "The specified server group already exists.")
        }
        other => panic!("Expected BadRequest, got {:?}", other),
    }

    assert!(service
        .create(other.id, Some("Servers".to_string()))
        .await
        .is_ok());

    Ok(())
}
