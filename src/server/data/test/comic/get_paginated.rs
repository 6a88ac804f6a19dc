use super::*;

/// Tests that public listings hide drafts and soft-deleted comics.
///
/// Expected: only the published, live comic
#[tokio::test]
async fn public_listing_hides_drafts_and_deleted() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let visible = factory::create_comic(db).await?;
    factory::comic::ComicFactory::new(db)
        .status(ComicStatus::Draft)
        .build()
        .await?;
    factory::comic::ComicFactory::new(db).deleted().build().await?;

    let repo = ComicRepository::new(db);
    let filter = ComicFilter {
        public_only: true,
        ..Default::default()
    };
    let (comics, total) = repo.get_paginated(&filter, PageRequest::default()).await?;

    assert_eq!(total, 1);
    assert_eq!(comics[0].id, visible.id);

    Ok(())
}

/// Tests the admin view of soft-deleted comics.
///
/// Expected: only the deleted comic when `deleted` is set
#[tokio::test]
async fn admin_can_list_deleted() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_comic(db).await?;
    let deleted = factory::comic::ComicFactory::new(db).deleted().build().await?;

    let repo = ComicRepository::new(db);
    let filter = ComicFilter {
        deleted: true,
        ..Default::default()
    };
    let (comics, total) = repo.get_paginated(&filter, PageRequest::default()).await?;

    assert_eq!(total, 1);
    assert_eq!(comics[0].id, deleted.id);

    Ok(())
}

/// Tests filtering by genre and tag slug.
///
/// Expected: only the comic carrying both; unknown slugs give an empty page
#[tokio::test]
async fn filters_by_genre_and_tag() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let genre = factory::genre::GenreFactory::new(db).slug("drama").build().await?;
    let tag = factory::tag::TagFactory::new(db).slug("weekly").build().await?;

    let both = factory::comic::ComicFactory::new(db)
        .genre_id(genre.id)
        .tag(tag.id)
        .build()
        .await?;
    factory::comic::ComicFactory::new(db)
        .genre_id(genre.id)
        .build()
        .await?;
    factory::comic::ComicFactory::new(db).tag(tag.id).build().await?;

    let repo = ComicRepository::new(db);
    let filter = ComicFilter {
        public_only: true,
        genre_slug: Some("drama".to_string()),
        tag_slug: Some("weekly".to_string()),
        ..Default::default()
    };
    let (comics, total) = repo.get_paginated(&filter, PageRequest::default()).await?;
    assert_eq!(total, 1);
    assert_eq!(comics[0].id, both.id);

    let unknown = ComicFilter {
        public_only: true,
        genre_slug: Some("missing".to_string()),
        ..Default::default()
    };
    let (comics, total) = repo.get_paginated(&unknown, PageRequest::default()).await?;
    assert_eq!(total, 0);
    assert!(comics.is_empty());

    Ok(())
}

/// Tests sorting and title search.
///
/// Expected: popular sorts by views, newest by creation time, search narrows by title
#[tokio::test]
async fn sorts_and_searches() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let old = factory::comic::ComicFactory::new(db)
        .title("Old Dragon")
        .views(50)
        .created_at(now - Duration::days(3))
        .build()
        .await?;
    let new = factory::comic::ComicFactory::new(db)
        .title("New Knight")
        .views(5)
        .created_at(now)
        .build()
        .await?;

    let repo = ComicRepository::new(db);

    let popular = ComicFilter {
        public_only: true,
        sort: ContentSort::Popular,
        ..Default::default()
    };
    let (comics, _) = repo.get_paginated(&popular, PageRequest::default()).await?;
    assert_eq!(comics[0].id, old.id);

    let newest = ComicFilter {
        public_only: true,
        ..Default::default()
    };
    let (comics, _) = repo.get_paginated(&newest, PageRequest::default()).await?;
    assert_eq!(comics[0].id, new.id);

    let search = ComicFilter {
        public_only: true,
        search: Some("dragon".to_string()),
        ..Default::default()
    };
    let (comics, total) = repo.get_paginated(&search, PageRequest::default()).await?;
    assert_eq!(total, 1);
    assert_eq!(comics[0].id, old.id);

    Ok(())
}
