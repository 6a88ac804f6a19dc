//! Blog post factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use entity::blog_post::PostStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test blog posts.
///
/// Posts default to `Published` with a short markdown body.
pub struct BlogPostFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    slug: String,
    content: String,
    author_id: Option<i32>,
    category_id: Option<i32>,
    status: PostStatus,
    publish_at: Option<DateTime<Utc>>,
    views: i64,
    likes: i64,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl<'a> BlogPostFactory<'a> {
    /// Creates a new BlogPostFactory titled `"Post {id}"` with slug `"post-{id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            title: format!("Post {}", id),
            slug: format!("post-{}", id),
            content: "Some *markdown* body.".to_string(),
            author_id: None,
            category_id: None,
            status: PostStatus::Published,
            publish_at: None,
            views: 0,
            likes: 0,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn author_id(mut self, author_id: i32) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Schedules the post for the given instant.
    pub fn scheduled(mut self, publish_at: DateTime<Utc>) -> Self {
        self.status = PostStatus::Scheduled;
        self.publish_at = Some(publish_at);
        self
    }

    pub fn status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    pub fn views(mut self, views: i64) -> Self {
        self.views = views;
        self
    }

    pub fn likes(mut self, likes: i64) -> Self {
        self.likes = likes;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.deleted_at = Some(Utc::now());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::blog_post::Model, DbErr> {
        let published_at = (self.status == PostStatus::Published).then_some(self.created_at);
        entity::blog_post::ActiveModel {
            title: ActiveValue::Set(self.title),
            slug: ActiveValue::Set(self.slug),
            excerpt: ActiveValue::Set("Some markdown body.".to_string()),
            content: ActiveValue::Set(self.content),
            author_id: ActiveValue::Set(self.author_id),
            category_id: ActiveValue::Set(self.category_id),
            cover_image_url: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            publish_at: ActiveValue::Set(self.publish_at),
            published_at: ActiveValue::Set(published_at),
            views: ActiveValue::Set(self.views),
            likes: ActiveValue::Set(self.likes),
            deleted_at: ActiveValue::Set(self.deleted_at),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a published blog post with default values.
pub async fn create_blog_post(db: &DatabaseConnection) -> Result<entity::blog_post::Model, DbErr> {
    BlogPostFactory::new(db).build().await
}
