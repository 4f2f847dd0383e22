use super::*;

/// Tests storing and overwriting a preference.
///
/// Expected: None before, latest value after
#[tokio::test]
async fn stores_and_overwrites_value() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = UserPreferenceRepository::new(db);

    assert!(repo.get(user.id, "browser.hide_shared_server").await?.is_none());

    repo.set(user.id, "browser.hide_shared_server", "true".to_string())
        .await?;
    repo.set(user.id, "browser.hide_shared_server", "false".to_string())
        .await?;

    assert_eq!(
        repo.get(user.id, "browser.hide_shared_server")
            .await?
            .as_deref(),
        Some("false")
    );

    Ok(())
}
