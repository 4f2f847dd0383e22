use super::*;

/// Tests visibility of servers inside a group.
///
/// Verifies that a user always sees their own servers and sees shared servers of
/// other users only when requested.
///
/// Expected: own servers always, shared servers with include_shared
#[tokio::test]
async fn filters_by_owner_and_shared_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let viewer = factory::user::create_user(db).await?;
    let group = factory::server_group::create_server_group(db, owner.id).await?;

    factory::server::ServerFactory::new(db, owner.id, group.id)
        .name("b-private")
        .build()
        .await?;
    factory::server::ServerFactory::new(db, owner.id, group.id)
        .name("a-shared")
        .shared(true)
        .build()
        .await?;

    let repo = ServerRepository::new(db);

    let owned = repo.list_visible_in_group(group.id, owner.id, false).await?;
    assert_eq!(
        owned.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["a-shared", "b-private"]
    );

    let shared = repo.list_visible_in_group(group.id, viewer.id, true).await?;
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].name, "a-shared");

    let hidden = repo.list_visible_in_group(group.id, viewer.id, false).await?;
    assert!(hidden.is_empty());

    Ok(())
}
