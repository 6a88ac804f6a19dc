use super::*;

/// Tests the public listing with a category filter.
///
/// Expected: only the published, live post in that category
#[tokio::test]
async fn public_listing_filters_by_category() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_blog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let news = factory::category::CategoryFactory::new(db)
        .slug("news")
        .build()
        .await?;
    let other = factory::create_category(db).await?;

    let visible = factory::blog_post::BlogPostFactory::new(db)
        .category_id(news.id)
        .build()
        .await?;
    factory::blog_post::BlogPostFactory::new(db)
        .category_id(news.id)
        .status(PostStatus::Draft)
        .build()
        .await?;
    factory::blog_post::BlogPostFactory::new(db)
        .category_id(news.id)
        .deleted()
        .build()
        .await?;
    factory::blog_post::BlogPostFactory::new(db)
        .category_id(other.id)
        .build()
        .await?;

    let repo = BlogPostRepository::new(db);
    let filter = BlogPostFilter {
        public_only: true,
        category_slug: Some("news".to_string()),
        ..Default::default()
    };
    let (posts, total) = repo.get_paginated(&filter, PageRequest::default()).await?;

    assert_eq!(total, 1);
    assert_eq!(posts[0].id, visible.id);

    Ok(())
}

/// Tests the admin status filter.
///
/// Expected: only scheduled posts
#[tokio::test]
async fn admin_filters_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_blog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_blog_post(db).await?;
    let scheduled = factory::blog_post::BlogPostFactory::new(db)
        .scheduled(Utc::now() + Duration::days(1))
        .build()
        .await?;

    let repo = BlogPostRepository::new(db);
    let filter = BlogPostFilter {
        status: Some(PostStatus::Scheduled),
        ..Default::default()
    };
    let (posts, total) = repo.get_paginated(&filter, PageRequest::default()).await?;

    assert_eq!(total, 1);
    assert_eq!(posts[0].id, scheduled.id);

    Ok(())
}
