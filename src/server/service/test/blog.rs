use chrono::{Duration, Utc};
use entity::blog_post::PostStatus;
use sea_orm::EntityTrait;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::AppError,
    model::blog::{CreateBlogPostParams, UpdateBlogPostParams},
    service::blog::BlogService,
};

fn params(title: &str, category_id: Option<i32>) -> CreateBlogPostParams {
    CreateBlogPostParams {
        title: title.to_string(),
        content: "# Heading\n\nSome **bold** words about inking.".to_string(),
        excerpt: None,
        author_id: None,
        category_id,
        cover_image_url: None,
        status: PostStatus::Published,
        publish_at: None,
    }
}

async fn post_count(db: &sea_orm::DatabaseConnection, id: i32) -> i64 {
    entity::prelude::Category::find_by_id(id)
        .one(db)
        .await
        .unwrap()
        .unwrap()
        .post_count
}

/// Tests excerpt derivation.
///
/// Expected: excerpt is the plain text of the markdown
#[tokio::test]
async fn derives_excerpt_from_content() -> Result<(), AppError> {
    let test = TestBuilder::new().with_blog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let post = BlogService::new(db).create(params("Inking", None)).await?;

    assert!(post.excerpt.starts_with("Heading"));
    assert!(!post.excerpt.contains('*'));
    assert!(post.published_at.is_some());

    Ok(())
}

/// Tests category counter maintenance.
///
/// Expected: post_count follows create, category change, delete and restore
#[tokio::test]
async fn post_count_follows_post_lifecycle() -> Result<(), AppError> {
    let test = TestBuilder::new().with_blog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let news = factory::create_category(db).await?;
    let guides = factory::create_category(db).await?;
    let service = BlogService::new(db);

    let post = service.create(params("Inking", Some(news.id))).await?;
    assert_eq!(post_count(db, news.id).await, 1);

    service
        .update(
            post.id,
            UpdateBlogPostParams {
                category_id: Some(Some(guides.id)),
                ..Default::default()
            },
            Utc::now(),
        )
        .await?;
    assert_eq!(post_count(db, news.id).await, 0);
    assert_eq!(post_count(db, guides.id).await, 1);

    service.delete(post.id, Utc::now()).await?;
    assert_eq!(post_count(db, guides.id).await, 0);

    service.restore(post.id).await?;
    assert_eq!(post_count(db, guides.id).await, 1);

    Ok(())
}

/// Tests the schedule check on update.
///
/// Expected: scheduling without a future publishAt is rejected
#[tokio::test]
async fn update_validates_schedule() -> Result<(), AppError> {
    let test = TestBuilder::new().with_blog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = BlogService::new(db);
    let post = service.create(params("Inking", None)).await?;
    let now = Utc::now();

    let missing = service
        .update(
            post.id,
            UpdateBlogPostParams {
                status: Some(PostStatus::Scheduled),
                ..Default::default()
            },
            now,
        )
        .await;
    assert!(matches!(missing, Err(AppError::BadRequest(_))));

    let scheduled = service
        .update(
            post.id,
            UpdateBlogPostParams {
                status: Some(PostStatus::Scheduled),
                publish_at: Some(now + Duration::hours(1)),
                ..Default::default()
            },
            now,
        )
        .await?;
    assert_eq!(scheduled.status, PostStatus::Scheduled);

    Ok(())
}

/// Tests the scheduled publishing run.
///
/// Expected: only due posts are published and become publicly readable
#[tokio::test]
async fn publishes_due_posts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::blog_post::BlogPostFactory::new(db)
        .slug("due")
        .scheduled(now - Duration::minutes(1))
        .build()
        .await?;
    factory::blog_post::BlogPostFactory::new(db)
        .slug("later")
        .scheduled(now + Duration::hours(1))
        .build()
        .await?;

    let service = BlogService::new(db);
    assert_eq!(service.publish_due(now).await?, 1);

    service.get_public_by_slug("due", now).await?;
    assert!(matches!(
        service.get_public_by_slug("later", now).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
