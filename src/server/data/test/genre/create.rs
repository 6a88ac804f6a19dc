use super::*;

/// Tests creating genres whose names collide after slugging.
///
/// Expected: second genre receives the `-1` suffix
#[tokio::test]
async fn creates_genres_with_unique_slugs() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GenreRepository::new(db);

    let slug = repo.available_slug("Sci Fi", None).await?;
    let first = repo
        .create(
            CreateGenreParams {
                name: "Sci Fi".to_string(),
                description: None,
            },
            slug,
        )
        .await?;

    let slug = repo.available_slug("Sci-Fi!", None).await?;
    let second = repo
        .create(
            CreateGenreParams {
                name: "Sci-Fi!".to_string(),
                description: Some("Spaceships".to_string()),
            },
            slug,
        )
        .await?;

    assert_eq!(first.slug, "sci-fi");
    assert_eq!(second.slug, "sci-fi-1");
    assert_eq!(second.comic_count, 0);
    assert_eq!(
        repo.find_by_slug("sci-fi-1").await?.map(|g| g.id),
        Some(second.id)
    );

    Ok(())
}
