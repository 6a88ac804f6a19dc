use super::*;

/// Tests publishing scheduled posts.
///
/// Verifies that only posts whose publish_at has passed are published, and that
/// published_at takes the scheduled instant.
///
/// Expected: due post published, future post untouched
#[tokio::test]
async fn publishes_only_due_posts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_blog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let due_at = now - Duration::minutes(5);
    let due = factory::blog_post::BlogPostFactory::new(db)
        .scheduled(due_at)
        .build()
        .await?;
    let future = factory::blog_post::BlogPostFactory::new(db)
        .scheduled(now + Duration::hours(2))
        .build()
        .await?;

    let repo = BlogPostRepository::new(db);
    let published = repo.publish_due(now).await?;

    assert_eq!(published, vec![due.id]);

    let due = repo.find_by_id(due.id).await?.unwrap();
    assert_eq!(due.status, PostStatus::Published);
    assert_eq!(
        due.published_at.map(|at| at.timestamp_millis()),
        Some(due_at.timestamp_millis())
    );

    let future = repo.find_by_id(future.id).await?.unwrap();
    assert_eq!(future.status, PostStatus::Scheduled);
    assert!(future.published_at.is_none());

    assert!(repo.publish_due(now).await?.is_empty());

    Ok(())
}
