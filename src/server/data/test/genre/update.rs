use super::*;

/// Tests renaming a genre.
///
/// Verifies that the slug probe ignores the genre itself, so renaming to a name with
/// the same slug keeps the slug unchanged.
///
/// Expected: Ok(Some(Genre)) with the original slug
#[tokio::test]
async fn keeps_own_slug_on_rename() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let genre = factory::genre::GenreFactory::new(db)
        .name("Horror")
        .slug("horror")
        .build()
        .await?;

    let repo = GenreRepository::new(db);
    let slug = repo.available_slug("HORROR", Some(genre.id)).await?;
    let updated = repo
        .update(
            genre.id,
            UpdateGenreParams {
                name: Some("HORROR".to_string()),
                description: Some(Some("Scary".to_string())),
            },
            Some(slug),
        )
        .await?
        .unwrap();

    assert_eq!(updated.slug, "horror");
    assert_eq!(updated.name, "HORROR");
    assert_eq!(updated.description.as_deref(), Some("Scary"));

    Ok(())
}

/// Tests updating a genre that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_genre() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GenreRepository::new(db);
    let result = repo.update(42, UpdateGenreParams::default(), None).await?;

    assert!(result.is_none());

    Ok(())
}
