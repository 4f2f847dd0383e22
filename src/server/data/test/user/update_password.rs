use super::*;

/// Tests replacing the password hash.
///
/// Expected: new hash stored
#[tokio::test]
async fn replaces_password_hash() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .password_hash("old-hash")
        .build()
        .await?;
    let repo = UserRepository::new(db);

    repo.update_password(user.id, "new-hash".to_string())
        .await?;

    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(stored.password_hash.as_deref(), Some("new-hash"));

    Ok(())
}
