use super::*;
use serde_json::json;

/// Tests root nodes mark only the first group as non-deletable.
///
/// Expected: can_delete false then true, user_id attached
#[tokio::test]
async fn get_nodes_protects_first_group() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config::default();

    let (user, first) = factory::helpers::create_user_with_default_group(db).await?;
    let second = factory::server_group::create_server_group(db, user.id).await?;

    let nodes = ServerGroupService::new(db, &config)
        .get_nodes(user.id)
        .await?;

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].node_id, first.id);
    assert_eq!(nodes[0].extra.get("can_delete"), Some(&json!(false)));
    assert_eq!(nodes[1].node_id, second.id);
    assert_eq!(nodes[1].extra.get("can_delete"), Some(&json!(true)));
    assert_eq!(nodes[0].extra.get("user_id"), Some(&json!(user.id)));

    Ok(())
}

/// Tests a foreign group reached through a shared server gets the shared icon.
///
/// Expected: icon-server_group_shared for the foreign group only
#[tokio::test]
async fn foreign_shared_group_uses_shared_icon() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config::default();

    let (owner, shared_group) = factory::helpers::create_user_with_default_group(db).await?;
    factory::server::ServerFactory::new(db, owner.id, shared_group.id)
        .shared(true)
        .build()
        .await?;
    let (viewer, _) = factory::helpers::create_user_with_default_group(db).await?;

    let service = ServerGroupService::new(db, &config);
    let nodes = service.nodes(viewer.id).await?;

    assert_eq!(nodes[0].icon, "icon-server_group_shared");
    assert_eq!(nodes[1].icon, "icon-server_group");
    assert!(nodes.iter().all(|node| node.extra.get("can_delete").is_none()));

    let owner_view = service.node(owner.id, shared_group.id).await?;
    assert_eq!(owner_view.icon, "icon-server_group");

    Ok(())
}

/// Tests requesting the node of a missing group.
///
/// Expected: Err(Gone) with the node-specific message
#[tokio::test]
async fn node_of_missing_group_is_gone() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config::default();

    let user = factory::user::create_user(db).await?;

    match ServerGroupService::new(db, &config).node(user.id, 999).await {
        Err(AppError::Gone(msg)) => assert_eq!(msg, "Could not find the server group."),
        other => panic!("Expected Gone, got {:?}", other),
    }

    Ok(())
}
