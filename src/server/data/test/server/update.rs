use super::*;

/// Tests partial updates only touch provided columns.
///
/// Expected: name and port changed, host unchanged
#[tokio::test]
async fn applies_partial_update() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let group = factory::server_group::create_server_group(db, user.id).await?;
    let server = factory::server::ServerFactory::new(db, user.id, group.id)
        .host("db.internal")
        .build()
        .await?;

    let updated = ServerRepository::new(db)
        .update(
            server.id,
            UpdateServerParams {
                name: Some("Renamed".to_string()),
                port: Some(6432),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.port, 6432);
    assert_eq!(updated.host, "db.internal");

    Ok(())
}

/// Tests updating a missing server.
///
/// Expected: None
#[tokio::test]
async fn returns_none_for_missing_server() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ServerRepository::new(db)
        .update(7, UpdateServerParams::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests deleting a server.
///
/// Expected: server no longer exists
#[tokio::test]
async fn deletes_server() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let group = factory::server_group::create_server_group(db, user.id).await?;
    let server = factory::server::create_server(db, user.id, group.id).await?;

    let repo = ServerRepository::new(db);
    repo.delete(server.id).await?;

    assert!(repo.find_by_id(server.id).await?.is_none());

    Ok(())
}
