use chrono::Utc;
use entity::comic::ComicStatus;
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::AppError,
    model::comic::{ComicFilter, CreateComicParams, UpdateComicParams},
    service::comic::ComicService,
    util::pagination::{PageRequest, MAX_PAGE},
};

fn params(title: &str, genre_id: Option<i32>, tag_ids: Vec<i32>) -> CreateComicParams {
    CreateComicParams {
        title: title.to_string(),
        description: String::new(),
        author: "Ink Studio".to_string(),
        cover_image_url: None,
        genre_id,
        tag_ids,
        status: ComicStatus::Published,
    }
}

async fn genre_count(db: &sea_orm::DatabaseConnection, id: i32) -> i64 {
    entity::prelude::Genre::find_by_id(id)
        .one(db)
        .await
        .unwrap()
        .unwrap()
        .comic_count
}

async fn tag_count(db: &sea_orm::DatabaseConnection, id: i32) -> i64 {
    entity::prelude::Tag::find_by_id(id)
        .one(db)
        .await
        .unwrap()
        .unwrap()
        .comic_count
}

/// Tests counter maintenance through the comic lifecycle.
///
/// Verifies that genre and tag counters follow create, reassignment, soft delete and
/// restore, always equal to the number of live comics referencing them.
///
/// Expected: counters match after every step
#[tokio::test]
async fn counters_follow_comic_lifecycle() -> Result<(), AppError> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let action = factory::create_genre(db).await?;
    let drama = factory::create_genre(db).await?;
    let ink = factory::create_tag(db).await?;
    let color = factory::create_tag(db).await?;

    let service = ComicService::new(db);
    let comic = service
        .create(params("Night Shift", Some(action.id), vec![ink.id]))
        .await?;

    assert_eq!(genre_count(db, action.id).await, 1);
    assert_eq!(tag_count(db, ink.id).await, 1);

    service
        .update(
            comic.id,
            UpdateComicParams {
                genre_id: Some(Some(drama.id)),
                tag_ids: Some(vec![color.id]),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(genre_count(db, action.id).await, 0);
    assert_eq!(genre_count(db, drama.id).await, 1);
    assert_eq!(tag_count(db, ink.id).await, 0);
    assert_eq!(tag_count(db, color.id).await, 1);

    service.delete(comic.id, Utc::now()).await?;
    assert_eq!(genre_count(db, drama.id).await, 0);
    assert_eq!(tag_count(db, color.id).await, 0);

    let restored = service.restore(comic.id).await?;
    assert!(restored.deleted_at.is_none());
    assert_eq!(genre_count(db, drama.id).await, 1);
    assert_eq!(tag_count(db, color.id).await, 1);

    Ok(())
}

/// Tests that a deleted comic can not be deleted twice.
///
/// Expected: Err(AppError::NotFound) and counters unchanged
#[tokio::test]
async fn double_delete_does_not_double_count() -> Result<(), AppError> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let genre = factory::create_genre(db).await?;
    let service = ComicService::new(db);
    let comic = service
        .create(params("Night Shift", Some(genre.id), vec![]))
        .await?;

    service.delete(comic.id, Utc::now()).await?;
    let again = service.delete(comic.id, Utc::now()).await;

    assert!(matches!(again, Err(AppError::NotFound(_))));
    assert_eq!(genre_count(db, genre.id).await, 0);

    Ok(())
}

/// Tests creating a comic with an unknown tag.
///
/// Expected: Err(AppError::BadRequest) and nothing persisted
#[tokio::test]
async fn rejects_unknown_tags() -> Result<(), AppError> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ComicService::new(db)
        .create(params("Night Shift", None, vec![404]))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(entity::prelude::Comic::find().count(db).await?, 0);

    Ok(())
}

/// Tests colliding titles.
///
/// Expected: distinct slugs
#[tokio::test]
async fn colliding_titles_get_distinct_slugs() -> Result<(), AppError> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = ComicService::new(db);
    let first = service.create(params("Night Shift!", None, vec![])).await?;
    let second = service.create(params("Night  Shift", None, vec![])).await?;

    assert_eq!(first.slug, "night-shift");
    assert_eq!(second.slug, "night-shift-1");

    Ok(())
}

/// Tests public reads by slug.
///
/// Expected: published comics count a view and log an event, drafts are hidden
#[tokio::test]
async fn public_read_counts_views() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::comic::ComicFactory::new(db)
        .slug("published")
        .views(2)
        .build()
        .await?;
    factory::comic::ComicFactory::new(db)
        .slug("draft")
        .status(ComicStatus::Draft)
        .build()
        .await?;

    let service = ComicService::new(db);
    let comic = service.get_public_by_slug("published", Utc::now()).await?;
    assert_eq!(comic.views, 3);
    assert_eq!(entity::prelude::ViewEvent::find().count(db).await?, 1);

    let draft = service.get_public_by_slug("draft", Utc::now()).await;
    assert!(matches!(draft, Err(AppError::NotFound(_))));

    let admin = service.get_by_id(comic.id).await?;
    assert_eq!(admin.views, 3);

    Ok(())
}

/// Tests listing far past the last page.
///
/// Expected: empty page with the real total, page number capped
#[tokio::test]
async fn lists_huge_page_number() -> Result<(), AppError> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = ComicService::new(db);
    service.create(params("Night Shift", None, vec![])).await?;

    let page = service
        .get_paginated(
            ComicFilter::default(),
            PageRequest::new(Some(u64::MAX), Some(10)),
        )
        .await?;

    assert!(page.comics.is_empty());
    assert_eq!(page.total, 1);
    assert_eq!(page.page, MAX_PAGE);

    Ok(())
}
