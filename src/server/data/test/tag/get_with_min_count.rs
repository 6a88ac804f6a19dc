use super::*;

/// Tests the tag cloud query.
///
/// Verifies that tags below the floor are excluded and the rest are ordered by count
/// descending, then by name.
///
/// Expected: [b(5), a(2), c(2)]
#[tokio::test]
async fn orders_by_count_then_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for (name, count) in [("c", 2), ("a", 2), ("b", 5), ("z", 0)] {
        factory::tag::TagFactory::new(db)
            .name(name)
            .comic_count(count)
            .build()
            .await?;
    }

    let repo = TagRepository::new(db);
    let tags = repo.get_with_min_count(1).await?;

    let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a", "c"]);

    Ok(())
}
