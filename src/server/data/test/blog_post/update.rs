use super::*;

/// Tests rewriting a draft into a published post.
///
/// Expected: new fields stored and published_at stamped
#[tokio::test]
async fn publishes_draft() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_blog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let post = factory::blog_post::BlogPostFactory::new(db)
        .status(PostStatus::Draft)
        .build()
        .await?;

    let repo = BlogPostRepository::new(db);
    let updated = repo
        .update(
            post.id,
            BlogPostChanges {
                title: "Renamed".to_string(),
                slug: "renamed".to_string(),
                excerpt: "New excerpt".to_string(),
                content: "New body".to_string(),
                category_id: None,
                cover_image_url: None,
                status: PostStatus::Published,
                publish_at: None,
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.slug, "renamed");
    assert_eq!(updated.status, PostStatus::Published);
    assert!(updated.published_at.is_some());

    assert!(repo
        .update(
            9999,
            BlogPostChanges {
                title: String::new(),
                slug: String::new(),
                excerpt: String::new(),
                content: String::new(),
                category_id: None,
                cover_image_url: None,
                status: PostStatus::Draft,
                publish_at: None,
            }
        )
        .await?
        .is_none());

    Ok(())
}
