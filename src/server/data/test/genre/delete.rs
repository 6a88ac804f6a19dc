use super::*;

/// Tests deleting a genre referenced by comics.
///
/// Expected: Ok(true) and the comic's genre_id cleared
#[tokio::test]
async fn deletes_genre_and_detaches_comics() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let genre = factory::create_genre(db).await?;
    let comic = factory::comic::ComicFactory::new(db)
        .genre_id(genre.id)
        .build()
        .await?;

    let repo = GenreRepository::new(db);
    assert!(repo.delete(genre.id).await?);
    assert!(repo.find_by_id(genre.id).await?.is_none());

    let stored = entity::prelude::Comic::find_by_id(comic.id)
        .one(db)
        .await?
        .unwrap();
    assert!(stored.genre_id.is_none());

    Ok(())
}
