use super::*;

/// Tests replacing a comic's tags and publishing it.
///
/// Expected: new tag set, published_at stamped on first publish
#[tokio::test]
async fn replaces_tags_and_publishes() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let old_tag = factory::create_tag(db).await?;
    let new_tag = factory::create_tag(db).await?;
    let comic = factory::comic::ComicFactory::new(db)
        .status(ComicStatus::Draft)
        .tag(old_tag.id)
        .build()
        .await?;

    let repo = ComicRepository::new(db);
    let updated = repo
        .update(
            comic.id,
            UpdateComicParams {
                tag_ids: Some(vec![new_tag.id]),
                status: Some(ComicStatus::Published),
                ..Default::default()
            },
            None,
        )
        .await?
        .unwrap();

    assert_eq!(repo.tag_ids(comic.id).await?, vec![new_tag.id]);
    assert_eq!(updated.tags.len(), 1);
    assert_eq!(updated.status, ComicStatus::Published);
    assert!(updated.published_at.is_some());

    Ok(())
}

/// Tests clearing a comic's genre.
///
/// Expected: genre removed
#[tokio::test]
async fn clears_genre() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let genre = factory::create_genre(db).await?;
    let comic = factory::comic::ComicFactory::new(db)
        .genre_id(genre.id)
        .build()
        .await?;

    let repo = ComicRepository::new(db);
    let updated = repo
        .update(
            comic.id,
            UpdateComicParams {
                genre_id: Some(None),
                ..Default::default()
            },
            None,
        )
        .await?
        .unwrap();

    assert!(updated.genre.is_none());

    Ok(())
}
