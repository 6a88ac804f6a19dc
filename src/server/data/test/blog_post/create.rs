use super::*;

/// Tests creating a published post with author and category.
///
/// Expected: relations resolved and published_at stamped
#[tokio::test]
async fn creates_post_with_relations() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_blog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let category = factory::create_category(db).await?;

    let repo = BlogPostRepository::new(db);
    let post = repo
        .create(NewBlogPost {
            author_id: Some(author.id),
            category_id: Some(category.id),
            status: PostStatus::Published,
            ..new_post("Launch Day", "launch-day")
        })
        .await?;

    assert_eq!(post.author.as_ref().map(|a| a.username.as_str()), Some(author.username.as_str()));
    assert_eq!(post.category.as_ref().map(|c| c.id), Some(category.id));
    assert!(post.published_at.is_some());
    assert!(post.is_public());

    Ok(())
}
