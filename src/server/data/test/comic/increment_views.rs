use super::*;

/// Tests the view counter.
///
/// Expected: each call adds exactly one
#[tokio::test]
async fn increments_views() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let comic = factory::comic::ComicFactory::new(db).views(7).build().await?;

    let repo = ComicRepository::new(db);
    repo.increment_views(comic.id).await?;
    repo.increment_views(comic.id).await?;

    let stored = repo.find_by_slug(&comic.slug).await?.unwrap();
    assert_eq!(stored.views, 9);

    Ok(())
}
