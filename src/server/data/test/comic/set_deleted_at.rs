use super::*;

/// Tests soft delete and restore.
///
/// Expected: exists_live false after delete and true after restore
#[tokio::test]
async fn soft_deletes_and_restores() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let comic = factory::create_comic(db).await?;

    let repo = ComicRepository::new(db);
    assert!(repo.set_deleted_at(comic.id, Some(Utc::now())).await?);
    assert!(!repo.exists_live(comic.id).await?);
    assert!(repo.find_by_id(comic.id).await?.unwrap().deleted_at.is_some());

    assert!(repo.set_deleted_at(comic.id, None).await?);
    assert!(repo.exists_live(comic.id).await?);

    assert!(!repo.set_deleted_at(9999, None).await?);

    Ok(())
}
