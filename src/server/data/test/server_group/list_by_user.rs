use super::*;

/// Tests listing orders by name and by creation.
///
/// Expected: name order and id order respectively, other users' groups excluded
#[tokio::test]
async fn lists_groups_in_both_orders() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    let repo = ServerGroupRepository::new(db);

    let servers = repo.create(user.id, "Servers").await?;
    let archive = repo.create(user.id, "Archive").await?;
    repo.create(other.id, "Foreign").await?;

    let by_name = repo.list_by_user_ordered_by_name(user.id).await?;
    assert_eq!(
        by_name.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(),
        vec!["Archive", "Servers"]
    );

    let by_id = repo.list_by_user(user.id).await?;
    assert_eq!(
        by_id.iter().map(|g| g.id).collect::<Vec<_>>(),
        vec![servers.id, archive.id]
    );

    let first = repo.first_for_user(user.id).await?.unwrap();
    assert_eq!(first.id, servers.id);

    Ok(())
}

/// Tests fetching groups by id.
///
/// Expected: requested groups only, empty input yields empty output
#[tokio::test]
async fn finds_groups_by_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_group_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = ServerGroupRepository::new(db);

    let first = repo.create(user.id, "One").await?;
    repo.create(user.id, "Two").await?;
    let third = repo.create(user.id, "Three").await?;

    let groups = repo.find_by_ids(vec![third.id, first.id]).await?;
    assert_eq!(
        groups.iter().map(|g| g.id).collect::<Vec<_>>(),
        vec![first.id, third.id]
    );
    assert!(repo.find_by_ids(Vec::new()).await?.is_empty());

    Ok(())
}
