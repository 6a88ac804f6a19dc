use super::*;

/// Tests that a tag name with only symbols still gets a usable slug.
///
/// Expected: slug `untitled`
#[tokio::test]
async fn falls_back_to_untitled_slug() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_comic_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TagRepository::new(db);
    let slug = repo.available_slug("!!!", None).await?;
    let tag = repo
        .create(
            CreateTagParams {
                name: "!!!".to_string(),
            },
            slug,
        )
        .await?;

    assert_eq!(tag.slug, "untitled");

    let slug = repo.available_slug("Noir", Some(tag.id)).await?;
    let renamed = repo
        .update(
            tag.id,
            UpdateTagParams {
                name: "Noir".to_string(),
            },
            slug,
        )
        .await?
        .unwrap();
    assert_eq!(renamed.slug, "noir");

    Ok(())
}
