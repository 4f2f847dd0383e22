use super::*;

/// Tests a new user gets the default server group.
///
/// Expected: Ok(user) owning exactly one group named `Servers`
#[tokio::test]
async fn creates_default_group() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_group_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserService::new(db)
        .create_user(CreateUserParam {
            username: "alice@example.com".to_string(),
            email: Some("alice@example.com".to_string()),
            password_hash: None,
            role: "User".to_string(),
            auth_source: AuthSourceKind::Internal,
            fs_uniquifier: "alice-uniquifier".to_string(),
        })
        .await?;

    let groups = ServerGroupRepository::new(db).list_by_user(user.id).await?;
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, DEFAULT_SERVER_GROUP);

    Ok(())
}

/// Tests external users are created without a password.
///
/// Expected: Ok(user) with the source set and a generated fs_uniquifier
#[tokio::test]
async fn creates_external_user_without_password() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_group_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserService::new(db)
        .create_external_user("jdoe", None, AuthSourceKind::Ldap, "User")
        .await?;

    assert_eq!(user.username, "jdoe");
    assert_eq!(user.auth_source, AuthSourceKind::Ldap);
    assert!(user.password_hash.is_none());
    assert_eq!(user.fs_uniquifier.len(), 32);
    assert_eq!(user.display_name(), "jdoe");

    Ok(())
}

/// Tests a failed default group insert leaves no user behind.
///
/// Expected: Err(DbErr) and an empty user table
#[tokio::test]
async fn rolls_back_user_when_group_insert_fails() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserService::new(db)
        .create_user(CreateUserParam {
            username: "alice@example.com".to_string(),
            email: Some("alice@example.com".to_string()),
            password_hash: None,
            role: "User".to_string(),
            auth_source: AuthSourceKind::Internal,
            fs_uniquifier: "alice-uniquifier".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::DbErr(_))));
    assert_eq!(UserRepository::new(db).count().await?, 0);

    Ok(())
}
