use super::*;

/// Tests the guarded counter updates.
///
/// Verifies that decrementing a zero counter leaves it at zero.
///
/// Expected: 1 after increment, 0 after two decrements
#[tokio::test]
async fn never_drops_below_zero() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tag = factory::create_tag(db).await?;

    let repo = TagRepository::new(db);
    repo.increment_comic_count(&[tag.id]).await?;
    assert_eq!(repo.find_by_id(tag.id).await?.unwrap().comic_count, 1);

    repo.decrement_comic_count(&[tag.id]).await?;
    repo.decrement_comic_count(&[tag.id]).await?;
    assert_eq!(repo.find_by_id(tag.id).await?.unwrap().comic_count, 0);

    Ok(())
}
