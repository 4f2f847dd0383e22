use super::*;

/// Tests login data stored in the session can be read back.
///
/// Expected: user id, crypt key and source state are returned as stored
#[tokio::test]
async fn stores_login_state() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();

    let auth_session = AuthSession::new(session);
    let key = derive_key("s3cret");
    let state = AuthSourceState {
        source_friendly_name: "internal".to_string(),
        auth_sources: vec![AuthSourceKind::Internal, AuthSourceKind::Ldap],
        current_source: AuthSourceKind::Internal,
    };

    auth_session.set_user_id(7).await?;
    auth_session.set_crypt_key(&key).await?;
    auth_session.set_auth_state(&state).await?;

    assert_eq!(auth_session.get_user_id().await?, Some(7));
    assert_eq!(auth_session.get_crypt_key().await?, Some(key));
    assert_eq!(auth_session.get_auth_state().await?, Some(state));
    assert!(auth_session.is_authenticated().await?);

    Ok(())
}

/// Tests clearing the session logs the user out.
///
/// Expected: no user id and no crypt key after clear
#[tokio::test]
async fn clear_removes_login() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();

    let auth_session = AuthSession::new(session);
    auth_session.set_user_id(7).await?;
    auth_session.set_crypt_key(&derive_key("s3cret")).await?;

    auth_session.clear().await;

    assert_eq!(auth_session.get_user_id().await?, None);
    assert_eq!(auth_session.get_crypt_key().await?, None);

    Ok(())
}
