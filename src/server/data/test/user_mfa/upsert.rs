use super::*;

/// Tests registering and re-registering a method.
///
/// Expected: one registration whose options are replaced
#[tokio::test]
async fn inserts_then_replaces_options() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = UserMfaRepository::new(db);

    assert!(!repo.has_any(user.id).await?);

    repo.upsert(user.id, "authenticator", Some("FIRST".to_string()))
        .await?;
    repo.upsert(user.id, "authenticator", Some("SECOND".to_string()))
        .await?;

    let registration = repo.find(user.id, "authenticator").await?.unwrap();
    assert_eq!(registration.options.as_deref(), Some("SECOND"));
    assert_eq!(repo.list_methods(user.id).await?, vec!["authenticator"]);
    assert!(repo.has_any(user.id).await?);

    Ok(())
}
