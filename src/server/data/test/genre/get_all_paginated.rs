use super::*;

/// Tests that genres are listed by name.
///
/// Expected: alphabetical order with the total count
#[tokio::test]
async fn lists_genres_by_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["Romance", "Action", "Mystery"] {
        factory::genre::GenreFactory::new(db).name(name).build().await?;
    }

    let repo = GenreRepository::new(db);
    let (genres, total) = repo.get_all_paginated(PageRequest::default()).await?;

    assert_eq!(total, 3);
    let names: Vec<_> = genres.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Action", "Mystery", "Romance"]);

    Ok(())
}
