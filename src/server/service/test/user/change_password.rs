use super::*;

use sea_orm::ConnectionTrait;

async fn internal_user(
    db: &sea_orm::DatabaseConnection,
    password: &str,
) -> Result<User, AppError> {
    let hash = hash_password(password).unwrap();
    let model = factory::user::UserFactory::new(db)
        .password_hash(hash)
        .build()
        .await?;

    User::from_entity(model)
}

/// Tests changing the password re-encrypts saved server passwords.
///
/// Expected: Ok(new key); the new password verifies and the server password decrypts
#[tokio::test]
async fn changes_password_and_reseals_servers() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = internal_user(db, "old-password").await?;
    let group = factory::server_group::create_server_group(db, user.id).await?;
    let old_key = derive_key("old-password");
    let server = factory::server::ServerFactory::new(db, user.id, group.id)
        .password(encrypt("pg-secret", &old_key)?)
        .build()
        .await?;

    let new_key = UserService::new(db)
        .change_password(&user, "old-password", "new-password", "new-password", &old_key)
        .await?;

    assert_eq!(new_key, derive_key("new-password"));

    let stored = UserRepository::new(db).find_by_id(user.id).await?.unwrap();
    assert!(verify_password("new-password", stored.password_hash.as_deref().unwrap()));

    let server = ServerRepository::new(db)
        .find_by_id(server.id)
        .await?
        .unwrap();
    assert_eq!(decrypt(&server.password.unwrap(), &new_key)?, "pg-secret");

    Ok(())
}

/// Tests a failed password update keeps the re-encrypted server passwords unwritten.
///
/// Expected: Err(DbErr); the old password still verifies and the server password still
/// decrypts with the old key
#[tokio::test]
async fn rolls_back_reseal_when_password_update_fails() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = internal_user(db, "old-password").await?;
    let group = factory::server_group::create_server_group(db, user.id).await?;
    let old_key = derive_key("old-password");
    let server = factory::server::ServerFactory::new(db, user.id, group.id)
        .password(encrypt("pg-secret", &old_key)?)
        .build()
        .await?;

    db.execute_unprepared(
        "CREATE TRIGGER reject_password_update BEFORE UPDATE OF password ON \"user\" \
         BEGIN SELECT RAISE(ABORT, 'password updates rejected'); END;",
    )
    .await?;

    let result = UserService::new(db)
        .change_password(&user, "old-password", "new-password", "new-password", &old_key)
        .await;

    assert!(matches!(result, Err(AppError::DbErr(_))));

    let stored = UserRepository::new(db).find_by_id(user.id).await?.unwrap();
    assert!(verify_password("old-password", stored.password_hash.as_deref().unwrap()));

    let server = ServerRepository::new(db)
        .find_by_id(server.id)
        .await?
        .unwrap();
    assert_eq!(decrypt(&server.password.unwrap(), &old_key)?, "pg-secret");

    Ok(())
}

/// Tests a wrong current password is rejected.
///
/// Expected: Err(InvalidPassword)
#[tokio::test]
async fn rejects_wrong_current_password() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = internal_user(db, "old-password").await?;

    let result = UserService::new(db)
        .change_password(&user, "guess", "new-password", "new-password", &derive_key("x"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidPassword))
    ));

    Ok(())
}

/// Tests mismatched and short new passwords.
///
/// Expected: Err(BadRequest) for both
#[tokio::test]
async fn rejects_bad_new_password() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = internal_user(db, "old-password").await?;
    let key = derive_key("old-password");
    let service = UserService::new(db);

    match service
        .change_password(&user, "old-password", "new-password", "other", &key)
        .await
    {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Passwords do not match"),
        other => panic!("Expected BadRequest, got {:?}", other),
    }

    match service
        .change_password(&user, "old-password", "abc", "abc", &key)
        .await
    {
        Err(AppError::BadRequest(msg)) => {
            assert_eq!(msg, "Password must be at least 6 characters")
        }
        other => panic!("Expected BadRequest, got {:?}", other),
    }

    Ok(())
}

/// Tests users of external sources cannot change a password here.
///
/// Expected: Err(NotInternalUser)
#[tokio::test]
async fn rejects_external_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let model = factory::user::UserFactory::new(db)
        .auth_source("ldap")
        .build()
        .await?;
    let user = User::from_entity(model)?;

    let result = UserService::new(db)
        .change_password(&user, "a", "new-password", "new-password", &derive_key("a"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NotInternalUser(_)))
    ));

    Ok(())
}
