use super::*;

/// Tests pending flag toggles.
///
/// Expected: false by default, true after set, false after reset
#[tokio::test]
async fn toggles_pending_flag() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();

    let mfa = MfaSession::new(session);
    assert!(!mfa.is_pending().await?);

    mfa.set_pending(true).await?;
    assert!(mfa.is_pending().await?);

    mfa.set_pending(false).await?;
    assert!(!mfa.is_pending().await?);

    Ok(())
}

/// Tests authenticator secret of a registration in progress.
///
/// Expected: secret stored, then cleared
#[tokio::test]
async fn stores_and_clears_authenticator_secret() -> Result<(), AppError> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let session = test.session().await.unwrap();

    let mfa = MfaSession::new(session);
    mfa.set_authenticator_secret("JBSWY3DPEHPK3PXP").await?;
    assert_eq!(
        mfa.get_authenticator_secret().await?.as_deref(),
        Some("JBSWY3DPEHPK3PXP")
    );

    mfa.clear_authenticator_secret().await?;
    assert_eq!(mfa.get_authenticator_secret().await?, None);

    Ok(())
}
