use super::*;

/// Tests creating a published comic with genre and tags.
///
/// Expected: relations resolved, tags sorted by name, published_at stamped
#[tokio::test]
async fn creates_comic_with_relations() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let genre = factory::create_genre(db).await?;
    let zeta = factory::tag::TagFactory::new(db).name("zeta").build().await?;
    let alpha = factory::tag::TagFactory::new(db).name("alpha").build().await?;

    let repo = ComicRepository::new(db);
    let comic = repo
        .create(
            CreateComicParams {
                genre_id: Some(genre.id),
                tag_ids: vec![zeta.id, alpha.id],
                status: ComicStatus::Published,
                ..params("Moon Patrol")
            },
            "moon-patrol".to_string(),
        )
        .await?;

    assert_eq!(comic.slug, "moon-patrol");
    assert_eq!(comic.genre.as_ref().map(|g| g.id), Some(genre.id));
    let tag_names: Vec<_> = comic.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tag_names, vec!["alpha", "zeta"]);
    assert!(comic.published_at.is_some());
    assert_eq!(comic.views, 0);
    assert_eq!(comic.likes, 0);

    Ok(())
}

/// Tests that drafts are not stamped as published.
///
/// Expected: published_at is None
#[tokio::test]
async fn draft_has_no_published_at() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ComicRepository::new(db);
    let comic = repo.create(params("Draft"), "draft".to_string()).await?;

    assert_eq!(comic.status, ComicStatus::Draft);
    assert!(comic.published_at.is_none());

    Ok(())
}
