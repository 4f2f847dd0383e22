use super::*;
use crate::server::service::preference::PreferenceService;

/// Tests server mode shows foreign groups holding shared servers.
///
/// Expected: own groups plus the shared foreign group, in id order
#[tokio::test]
async fn includes_groups_with_shared_servers() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config::default();

    let (owner, shared_group) = factory::helpers::create_user_with_default_group(db).await?;
    let private_group = factory::server_group::create_server_group(db, owner.id).await?;
    factory::server::ServerFactory::new(db, owner.id, shared_group.id)
        .shared(true)
        .build()
        .await?;
    factory::server::create_server(db, owner.id, private_group.id).await?;
    let (viewer, own_group) = factory::helpers::create_user_with_default_group(db).await?;

    let groups = ServerGroupService::new(db, &config)
        .get_all_server_groups(viewer.id)
        .await?;

    let ids: Vec<i32> = groups.iter().map(|visible| visible.group.id).collect();
    assert_eq!(ids, vec![shared_group.id, own_group.id]);
    assert!(groups[0].has_shared_server);
    assert!(!groups[1].has_shared_server);

    Ok(())
}

/// Tests the hide_shared_server preference hides foreign groups.
///
/// Expected: only the user's own group
#[tokio::test]
async fn hides_shared_groups_when_preferred() -> Result<(), AppError> {
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
    let (viewer, own_group) = factory::helpers::create_user_with_default_group(db).await?;
    PreferenceService::new(db, &config)
        .set(viewer.id, "browser", "hide_shared_server", serde_json::json!(true))
        .await?;

    let groups = ServerGroupService::new(db, &config)
        .get_all_server_groups(viewer.id)
        .await?;

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].group.id, own_group.id);

    Ok(())
}

/// Tests desktop mode only shows the user's own groups.
///
/// Expected: foreign shared group not visible
#[tokio::test]
async fn desktop_mode_shows_own_groups_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = Config {
        server_mode: false,
        ..Config::default()
    };

    let (owner, shared_group) = factory::helpers::create_user_with_default_group(db).await?;
    factory::server::ServerFactory::new(db, owner.id, shared_group.id)
        .shared(true)
        .build()
        .await?;
    let (viewer, own_group) = factory::helpers::create_user_with_default_group(db).await?;

    let groups = ServerGroupService::new(db, &config)
        .visible_groups(viewer.id)
        .await?;

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].group.id, own_group.id);

    Ok(())
}
