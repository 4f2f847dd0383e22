use super::*;

/// Tests a partial update keeps the fields that were not sent.
///
/// Expected: Ok(server) with the new name and the old host
#[tokio::test]
async fn updates_owned_server() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, group) = factory::helpers::create_user_with_default_group(db).await?;
    let server = factory::server::ServerFactory::new(db, user.id, group.id)
        .host("db1.internal")
        .build()
        .await?;

    let dto = UpdateServerDto {
        name: Some("Renamed".to_string()),
        ..Default::default()
    };
    let updated = ServerService::new(db)
        .update(user.id, group.id, server.id, dto, None)
        .await?;

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.host, "db1.internal");

    Ok(())
}

/// Tests turning off save_password forgets the stored password.
///
/// Expected: password cleared
#[tokio::test]
async fn clears_password_when_no_longer_saved() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, group) = factory::helpers::create_user_with_default_group(db).await?;
    let key = derive_key("hunter2");
    let server = factory::server::ServerFactory::new(db, user.id, group.id)
        .password(encrypt("pg-secret", &key)?)
        .build()
        .await?;

    let dto = UpdateServerDto {
        save_password: Some(false),
        ..Default::default()
    };
    let service = ServerService::new(db);
    let updated = service
        .update(user.id, group.id, server.id, dto, Some(&key))
        .await?;

    assert!(updated.password.is_none());
    let stored = service.properties(user.id, group.id, server.id, true).await?;
    assert!(stored.password.is_none());

    Ok(())
}

/// Tests another user cannot modify a shared server.
///
/// Expected: Err(AccessDenied) for update, delete and clearing the password
#[tokio::test]
async fn shared_server_is_read_only_for_others() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, group) = factory::helpers::create_user_with_default_group(db).await?;
    let other = factory::user::create_user(db).await?;
    let server = factory::server::ServerFactory::new(db, owner.id, group.id)
        .shared(true)
        .build()
        .await?;

    let service = ServerService::new(db);

    let result = service
        .update(other.id, group.id, server.id, UpdateServerDto::default(), None)
        .await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let result = service.delete(other.id, group.id, server.id).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    let result = service
        .clear_saved_password(other.id, group.id, server.id)
        .await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    assert!(service.does_server_exist(server.id).await?);

    Ok(())
}

/// Tests a private server of another user is invisible rather than forbidden.
///
/// Expected: Err(Gone)
#[tokio::test]
async fn private_server_of_other_user_is_gone() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (owner, group) = factory::helpers::create_user_with_default_group(db).await?;
    let other = factory::user::create_user(db).await?;
    let server = factory::server::create_server(db, owner.id, group.id).await?;

    let result = ServerService::new(db)
        .delete(other.id, group.id, server.id)
        .await;

    match result {
        Err(AppError::Gone(msg)) => assert_eq!(msg, "Could not find the required server."),
        other => panic!("Expected Gone, got {:?}", other),
    }
    assert!(ServerService::new(db).does_server_exist(server.id).await?);

    Ok(())
}

/// Tests enabling the SSH tunnel requires a valid tunnel host.
///
/// Expected: Err(BadRequest) without a host, Ok once a host name is given
#[tokio::test]
async fn enabling_tunnel_checks_tunnel_host() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, group) = factory::helpers::create_user_with_default_group(db).await?;
    let server = factory::server::create_server(db, user.id, group.id).await?;
    let service = ServerService::new(db);

    let dto = UpdateServerDto {
        use_ssh_tunnel: Some(true),
        ..Default::default()
    };
    match service.update(user.id, group.id, server.id, dto, None).await {
        Err(AppError::BadRequest(msg)) => {
            assert_eq!(msg, "Could not find the required parameter (Tunnel host).")
        }
        other => panic!("Expected BadRequest, got {:?}", other),
    }

    let dto = UpdateServerDto {
        use_ssh_tunnel: Some(true),
        tunnel_host: Some("bastion.example.com".to_string()),
        ..Default::default()
    };
    let updated = service
        .update(user.id, group.id, server.id, dto, None)
        .await?;
    assert!(updated.use_ssh_tunnel);
    assert_eq!(updated.tunnel_host.as_deref(), Some("bastion.example.com"));

    Ok(())
}
