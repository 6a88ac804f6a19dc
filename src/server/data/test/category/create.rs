use super::*;

/// Tests creating a category.
///
/// Expected: slug derived from name and an empty post counter
#[tokio::test]
async fn creates_category() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_blog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CategoryRepository::new(db);
    let slug = repo.available_slug("Behind the Scenes", None).await?;
    let category = repo
        .create(
            CreateCategoryParams {
                name: "Behind the Scenes".to_string(),
                description: None,
            },
            slug,
        )
        .await?;

    assert_eq!(category.slug, "behind-the-scenes");
    assert_eq!(category.post_count, 0);

    Ok(())
}
