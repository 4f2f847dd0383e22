use super::*;

/// Tests shared server detection per group.
///
/// Expected: only the group holding a shared server is reported
#[tokio::test]
async fn reports_groups_with_shared_servers() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let shared_group = factory::server_group::create_server_group(db, user.id).await?;
    let private_group = factory::server_group::create_server_group(db, user.id).await?;

    factory::server::ServerFactory::new(db, user.id, shared_group.id)
        .shared(true)
        .build()
        .await?;
    factory::server::ServerFactory::new(db, user.id, shared_group.id)
        .shared(true)
        .build()
        .await?;
    factory::server::create_server(db, user.id, private_group.id).await?;

    let repo = ServerRepository::new(db);

    assert!(repo.has_shared_in_group(shared_group.id).await?);
    assert!(!repo.has_shared_in_group(private_group.id).await?);
    assert_eq!(
        repo.group_ids_with_shared_servers().await?,
        vec![shared_group.id]
    );

    Ok(())
}
