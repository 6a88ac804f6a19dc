use super::*;

/// Tests deleting a tag linked to a comic.
///
/// Expected: Ok(true) and the comic_tag rows removed
#[tokio::test]
async fn deletes_tag_and_links() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tag = factory::create_tag(db).await?;
    factory::comic::ComicFactory::new(db).tag(tag.id).build().await?;

    let repo = TagRepository::new(db);
    assert!(repo.delete(tag.id).await?);

    assert_eq!(entity::prelude::ComicTag::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Comic::find().count(db).await?, 1);

    Ok(())
}
