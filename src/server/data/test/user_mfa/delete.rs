use super::*;

/// Tests removing a registration.
///
/// Expected: true when removed, false when nothing was registered
#[tokio::test]
async fn removes_registration() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    factory::user_mfa::create_user_mfa(db, user.id, "authenticator", Some("SECRET")).await?;

    let repo = UserMfaRepository::new(db);

    assert!(repo.delete(user.id, "authenticator").await?);
    assert!(!repo.delete(user.id, "authenticator").await?);
    assert!(repo.find(user.id, "authenticator").await?.is_none());

    Ok(())
}
