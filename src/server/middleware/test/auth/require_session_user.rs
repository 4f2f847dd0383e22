use super::*;

/// Tests the session user resolves even while the second factor is pending.
///
/// Expected: Ok(User)
#[tokio::test]
async fn ignores_pending_mfa() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;
    MfaSession::new(session).set_pending(true).await?;

    let returned_user = AuthGuard::new(db, session).require_session_user().await?;

    assert_eq!(returned_user.id, user.id);

    Ok(())
}

/// Tests locked accounts are rejected.
///
/// Expected: Err(AuthError::UserInactive)
#[tokio::test]
async fn denies_locked_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::UserFactory::new(db)
        .locked(true)
        .build()
        .await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session).require_session_user().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserInactive(_)))
    ));

    Ok(())
}

/// Tests inactive accounts are rejected.
///
/// Expected: Err(AuthError::UserInactive)
#[tokio::test]
async fn denies_inactive_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::UserFactory::new(db)
        .active(false)
        .build()
        .await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session).require_session_user().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserInactive(_)))
    ));

    Ok(())
}
