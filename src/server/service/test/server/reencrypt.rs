use super::*;

/// Tests saved passwords are re-sealed under the new key.
///
/// Expected: both passwords decrypt with the new key
#[tokio::test]
async fn reseals_passwords_under_new_key() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, group) = factory::helpers::create_user_with_default_group(db).await?;
    let old_key = derive_key("old-password");
    let new_key = derive_key("new-password");
    let server = factory::server::ServerFactory::new(db, user.id, group.id)
        .password(encrypt("pg-secret", &old_key)?)
        .tunnel_password(encrypt("ssh-secret", &old_key)?)
        .build()
        .await?;

    let service = ServerService::new(db);
    service
        .reencrypt_server_passwords(user.id, &old_key, &new_key)
        .await?;

    let stored = service.properties(user.id, group.id, server.id, true).await?;
    assert_eq!(decrypt(&stored.password.unwrap(), &new_key)?, "pg-secret");
    assert_eq!(
        decrypt(&stored.tunnel_password.unwrap(), &new_key)?,
        "ssh-secret"
    );

    Ok(())
}

/// Tests a password sealed under a different key is dropped.
///
/// Expected: Ok(()) with the undecryptable password removed and the other one kept
#[tokio::test]
async fn drops_undecryptable_password() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, group) = factory::helpers::create_user_with_default_group(db).await?;
    let old_key = derive_key("old-password");
    let new_key = derive_key("new-password");
    let stranger_key = derive_key("someone-else");
    let broken = factory::server::ServerFactory::new(db, user.id, group.id)
        .password(encrypt("lost", &stranger_key)?)
        .build()
        .await?;
    let intact = factory::server::ServerFactory::new(db, user.id, group.id)
        .password(encrypt("kept", &old_key)?)
        .build()
        .await?;

    let service = ServerService::new(db);
    service
        .reencrypt_server_passwords(user.id, &old_key, &new_key)
        .await?;

    let broken = service.properties(user.id, group.id, broken.id, true).await?;
    assert!(broken.password.is_none());
    let intact = service.properties(user.id, group.id, intact.id, true).await?;
    assert_eq!(decrypt(&intact.password.unwrap(), &new_key)?, "kept");

    Ok(())
}

/// Tests removing every saved password of a user.
///
/// Expected: the user's passwords are gone, other users keep theirs
#[tokio::test]
async fn removes_saved_passwords_of_user_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let key = derive_key("pw");
    let (user, group) = factory::helpers::create_user_with_default_group(db).await?;
    let (other, other_group) = factory::helpers::create_user_with_default_group(db).await?;
    let mine = factory::server::ServerFactory::new(db, user.id, group.id)
        .password(encrypt("a", &key)?)
        .build()
        .await?;
    let theirs = factory::server::ServerFactory::new(db, other.id, other_group.id)
        .password(encrypt("b", &key)?)
        .build()
        .await?;

    let service = ServerService::new(db);
    service.remove_saved_passwords(user.id).await?;

    let mine = service.properties(user.id, group.id, mine.id, true).await?;
    assert!(mine.password.is_none());
    let theirs = service
        .properties(other.id, other_group.id, theirs.id, true)
        .await?;
    assert!(theirs.password.is_some());

    Ok(())
}
