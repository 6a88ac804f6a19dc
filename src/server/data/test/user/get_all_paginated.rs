use super::*;

/// Tests paginating users ordered by username.
///
/// Expected: first page holds the alphabetically first users, total counts all
#[tokio::test]
async fn paginates_by_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["carol", "alice", "bob"] {
        factory::user::UserFactory::new(db).username(name).build().await?;
    }

    let repo = UserRepository::new(db);
    let (users, total) = repo
        .get_all_paginated(None, PageRequest::new(Some(1), Some(2)))
        .await?;

    assert_eq!(total, 3);
    let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob"]);

    let (second, _) = repo
        .get_all_paginated(None, PageRequest::new(Some(2), Some(2)))
        .await?;
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].username, "carol");

    Ok(())
}

/// Tests the search filter on username and email.
///
/// Expected: only matching users returned
#[tokio::test]
async fn filters_by_search() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db).username("inker").build().await?;
    factory::user::UserFactory::new(db)
        .username("reader")
        .email("ink.fan@example.com")
        .build()
        .await?;
    factory::user::UserFactory::new(db).username("other").build().await?;

    let repo = UserRepository::new(db);
    let (users, total) = repo
        .get_all_paginated(Some("ink"), PageRequest::default())
        .await?;

    assert_eq!(total, 2);
    assert!(users.iter().all(|u| u.username != "other"));

    Ok(())
}
