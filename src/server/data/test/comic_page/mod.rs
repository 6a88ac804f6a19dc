use crate::server::{data::comic_page::ComicPageRepository, model::comic::UpdateComicPageParams};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests that pages come back in page-number order.
///
/// Expected: [1, 2, 3] and last page number 3
#[tokio::test]
async fn lists_pages_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let comic = factory::create_comic(db).await?;
    for number in [3, 1, 2] {
        factory::create_comic_page(db, comic.id, number).await?;
    }

    let repo = ComicPageRepository::new(db);
    let pages = repo.get_by_comic_id(comic.id).await?;

    let numbers: Vec<_> = pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(repo.last_page_number(comic.id).await?, Some(3));

    Ok(())
}

/// Tests the duplicate page number probe.
///
/// Expected: taken for another page, free when the only holder is excluded
#[tokio::test]
async fn detects_taken_page_number() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let comic = factory::create_comic(db).await?;
    let page = factory::create_comic_page(db, comic.id, 1).await?;

    let repo = ComicPageRepository::new(db);
    assert!(repo.page_number_taken(comic.id, 1, None).await?);
    assert!(!repo.page_number_taken(comic.id, 1, Some(page.id)).await?);
    assert!(!repo.page_number_taken(comic.id, 2, None).await?);
    assert_eq!(repo.last_page_number(9999).await?, None);

    Ok(())
}

/// Tests that pages are scoped to their comic on update and delete.
///
/// Expected: None/false through the wrong comic, success through the right one
#[tokio::test]
async fn scopes_pages_to_comic() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let comic = factory::create_comic(db).await?;
    let other = factory::create_comic(db).await?;
    let page = factory::create_comic_page(db, comic.id, 1).await?;

    let repo = ComicPageRepository::new(db);
    let params = UpdateComicPageParams {
        caption: Some(Some("Opening".to_string())),
        ..Default::default()
    };

    assert!(repo.update(other.id, page.id, params.clone()).await?.is_none());
    let updated = repo.update(comic.id, page.id, params).await?.unwrap();
    assert_eq!(updated.caption.as_deref(), Some("Opening"));

    assert!(!repo.delete(other.id, page.id).await?);
    assert!(repo.delete(comic.id, page.id).await?);
    assert!(repo.find(comic.id, page.id).await?.is_none());

    Ok(())
}
