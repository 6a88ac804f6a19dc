use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::AppError,
    model::comic::CreateComicPageParams,
    service::comic_page::ComicPageService,
};

fn page(page_number: Option<i32>) -> CreateComicPageParams {
    CreateComicPageParams {
        page_number,
        image_url: "https://cdn.example.com/page.png".to_string(),
        caption: None,
    }
}

/// Tests appending pages without explicit numbers.
///
/// Expected: pages numbered after the highest existing one
#[tokio::test]
async fn appends_after_last_page() -> Result<(), AppError> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let comic = factory::create_comic(db).await?;

    let service = ComicPageService::new(db);
    let first = service.create(comic.id, page(None)).await?;
    let explicit = service.create(comic.id, page(Some(7))).await?;
    let appended = service.create(comic.id, page(None)).await?;

    assert_eq!(first.page_number, 1);
    assert_eq!(explicit.page_number, 7);
    assert_eq!(appended.page_number, 8);

    Ok(())
}

/// Tests appending after a page that holds the largest possible number.
///
/// Expected: BadRequest instead of an overflowing page number
#[tokio::test]
async fn rejects_append_after_largest_page_number() -> Result<(), AppError> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let comic = factory::create_comic(db).await?;

    let service = ComicPageService::new(db);
    service.create(comic.id, page(Some(i32::MAX))).await?;

    let result = service.create(comic.id, page(None)).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let pages = service.list(comic.id, false).await?;
    assert_eq!(pages.len(), 1);

    Ok(())
}
