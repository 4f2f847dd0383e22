use super::*;

/// Tests creating a new internal user.
///
/// Verifies that the repository stores the user active, unlocked and without failed
/// attempts.
///
/// Expected: Ok with the stored user
#[tokio::test]
async fn creates_internal_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParam {
            username: "jdoe@example.com".to_string(),
            email: Some("jdoe@example.com".to_string()),
            password_hash: Some("$argon2id$hash".to_string()),
            role: ROLE_USER.to_string(),
            auth_source: AuthSourceKind::Internal,
            fs_uniquifier: "abc".to_string(),
        })
        .await?;

    assert_eq!(user.username, "jdoe@example.com");
    assert_eq!(user.auth_source, AuthSourceKind::Internal);
    assert_eq!(user.login_attempts, 0);
    assert!(user.active);
    assert!(!user.locked);
    assert!(!user.is_admin());
    assert_eq!(repo.count().await?, 1);

    Ok(())
}

/// Tests creating a password-less OAuth2 user.
///
/// Expected: Ok with no password hash stored
#[tokio::test]
async fn creates_external_user_without_password() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserRepository::new(db)
        .create(CreateUserParam {
            username: "octocat".to_string(),
            email: None,
            password_hash: None,
            role: ROLE_USER.to_string(),
            auth_source: AuthSourceKind::OAuth2,
            fs_uniquifier: "xyz".to_string(),
        })
        .await?;

    assert_eq!(user.auth_source, AuthSourceKind::OAuth2);
    assert!(user.password_hash.is_none());
    assert_eq!(user.display_name(), "octocat");

    Ok(())
}

/// Tests a stored user with an unknown authentication source.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn rejects_unknown_auth_source() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .auth_source("saml")
        .build()
        .await?;

    let result = UserRepository::new(db).find_by_id(user.id).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
