use super::*;

/// Tests registering a server.
///
/// Expected: Ok with all columns stored
#[tokio::test]
async fn creates_server() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let group = factory::server_group::create_server_group(db, user.id).await?;

    let repo = ServerRepository::new(db);
    let server = repo
        .create(CreateServerParams {
            user_id: user.id,
            servergroup_id: group.id,
            name: "Primary".to_string(),
            host: "db.example.com".to_string(),
            port: 5433,
            maintenance_db: "postgres".to_string(),
            username: "admin".to_string(),
            password: Some("sealed".to_string()),
            save_password: true,
            shared: false,
            comment: Some("main cluster".to_string()),
            use_ssh_tunnel: false,
            tunnel_host: None,
            tunnel_port: None,
            tunnel_username: None,
            tunnel_password: None,
        })
        .await?;

    assert_eq!(server.name, "Primary");
    assert_eq!(server.port, 5433);
    assert_eq!(server.password.as_deref(), Some("sealed"));
    assert!(repo.exists(server.id).await?);
    assert!(!repo.exists(server.id + 1).await?);

    Ok(())
}
