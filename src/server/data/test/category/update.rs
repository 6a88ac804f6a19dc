use super::*;

/// Tests renaming a category onto a slug held by another category.
///
/// Expected: the renamed category receives a suffixed slug
#[tokio::test]
async fn renames_with_suffix_on_collision() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_blog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::category::CategoryFactory::new(db)
        .name("News")
        .slug("news")
        .build()
        .await?;
    let other = factory::create_category(db).await?;

    let repo = CategoryRepository::new(db);
    let slug = repo.available_slug("News", Some(other.id)).await?;
    let updated = repo
        .update(
            other.id,
            UpdateCategoryParams {
                name: Some("News".to_string()),
                description: None,
            },
            Some(slug),
        )
        .await?
        .unwrap();

    assert_eq!(updated.slug, "news-1");

    Ok(())
}
