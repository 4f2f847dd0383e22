use super::*;

/// Tests the first registration step issues a secret kept in the session.
///
/// Expected: Pending view; a second request reuses the same secret
#[tokio::test]
async fn issues_and_reuses_session_secret() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let config = Config::default();

    let user = User::from_entity(factory::user::create_user(db).await?)?;
    let service = MfaService::new(db, &config, session);

    let MfaRegistration::Pending(first) = service
        .register(&user, "authenticator", &MfaRegisterForm::default())
        .await?
    else {
        panic!("Expected a pending registration");
    };
    let MfaRegistration::Pending(second) = service
        .register(&user, "authenticator", &MfaRegisterForm::default())
        .await?
    else {
        panic!("Expected a pending registration");
    };

    assert_eq!(first.secret, second.secret);
    assert!(first.provisioning_uri.starts_with("otpauth://totp/"));
    assert!(!first.qr_code.is_empty());
    assert_eq!(
        MfaSession::new(session).get_authenticator_secret().await?,
        Some(first.secret)
    );

    Ok(())
}

/// Tests submitting the right code completes the registration.
///
/// Expected: Registered, secret stored, success flash, method listed as registered
#[tokio::test]
async fn registers_with_valid_code() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let config = Config::default();

    let user = User::from_entity(factory::user::create_user(db).await?)?;
    let service = MfaService::new(db, &config, session);

    let MfaRegistration::Pending(view) = service
        .register(&user, "authenticator", &MfaRegisterForm::default())
        .await?
    else {
        panic!("Expected a pending registration");
    };

    let form = MfaRegisterForm {
        code: Some(current_code(&view.secret)),
        validate: Some("validate".to_string()),
    };
    let result = service.register(&user, "authenticator", &form).await?;

    assert_eq!(result, MfaRegistration::Registered);
    let stored = UserMfaRepository::new(db)
        .find(user.id, "authenticator")
        .await?
        .unwrap();
    assert_eq!(stored.options.as_deref(), Some(view.secret.as_str()));
    assert!(MfaSession::new(session)
        .get_authenticator_secret()
        .await?
        .is_none());

    let flashes = FlashSession::new(session).take_all().await?;
    assert_eq!(flashes.len(), 1);
    assert_eq!(flashes[0].category, FlashCategory::Success);

    let methods = service.list(user.id).await?;
    assert_eq!(methods.len(), 1);
    assert!(methods[0].registered);

    Ok(())
}

/// Tests a wrong code keeps the registration pending.
///
/// Expected: Pending view with a danger flash, nothing stored
#[tokio::test]
async fn wrong_code_stays_pending() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let config = Config::default();

    let user = User::from_entity(factory::user::create_user(db).await?)?;
    let service = MfaService::new(db, &config, session);

    service
        .register(&user, "authenticator", &MfaRegisterForm::default())
        .await?;
    let form = MfaRegisterForm {
        code: Some("not-a-code".to_string()),
        validate: Some("validate".to_string()),
    };
    let result = service.register(&user, "authenticator", &form).await?;

    assert!(matches!(result, MfaRegistration::Pending(_)));
    assert!(!UserMfaRepository::new(db).has_any(user.id).await?);

    let flashes = FlashSession::new(session).take_all().await?;
    assert_eq!(flashes[0].category, FlashCategory::Danger);
    assert_eq!(flashes[0].message, "Failed to validate the code");

    Ok(())
}

/// Tests removing a registration.
///
/// Expected: Ok(()) once, then Err(NotFound)
#[tokio::test]
async fn unregisters_method() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let config = Config::default();

    let user = factory::user::create_user(db).await?;
    factory::user_mfa::create_user_mfa(db, user.id, "authenticator", Some("SECRET")).await?;
    let service = MfaService::new(db, &config, session);

    service.unregister(user.id, "authenticator").await?;

    assert!(matches!(
        service.unregister(user.id, "authenticator").await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
