//! Blog post management, public reads and scheduled publishing.
//!
//! Live posts count towards their category's `post_count`. Writes that change the
//! category or the deletion state adjust the counter in the same transaction.

use chrono::{DateTime, Utc};
use entity::view_event::ContentKind;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        blog_post::{BlogPostChanges, BlogPostRepository, NewBlogPost},
        category::CategoryRepository,
        view::ViewEventRepository,
    },
    error::AppError,
    model::blog::{
        validate_schedule, BlogPost, BlogPostFilter, CreateBlogPostParams, PaginatedBlogPosts,
        UpdateBlogPostParams,
    },
    util::{markdown, pagination::PageRequest},
};

pub struct BlogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BlogService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a post. A missing excerpt is derived from the rendered content.
    ///
    /// # Returns
    /// - `Ok(BlogPost)` - Created post
    /// - `Err(AppError::BadRequest)` - Unknown category id
    pub async fn create(&self, params: CreateBlogPostParams) -> Result<BlogPost, AppError> {
        let txn = self.db.begin().await?;

        check_category(&txn, params.category_id).await?;

        let repo = BlogPostRepository::new(&txn);
        let slug = repo.available_slug(&params.title, None).await?;
        let excerpt = params
            .excerpt
            .unwrap_or_else(|| markdown::excerpt(&params.content));

        let post = repo
            .create(NewBlogPost {
                title: params.title,
                slug,
                excerpt,
                content: params.content,
                author_id: params.author_id,
                category_id: params.category_id,
                cover_image_url: params.cover_image_url,
                status: params.status,
                publish_at: params.publish_at,
            })
            .await?;

        if let Some(category_id) = params.category_id {
            CategoryRepository::new(&txn)
                .increment_post_count(category_id)
                .await?;
        }

        txn.commit().await?;

        tracing::info!("Created blog post {} ({})", post.id, post.slug);
        Ok(post)
    }

    /// Admin read by id, soft-deleted posts included. Does not count as a view.
    pub async fn get_by_id(&self, id: i32) -> Result<BlogPost, AppError> {
        BlogPostRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))
    }

    /// Public read by slug; counts a view for published, non-deleted posts.
    ///
    /// # Returns
    /// - `Ok(BlogPost)` - Post with the incremented view count
    /// - `Err(AppError::NotFound)` - Unknown slug, unpublished or deleted post
    pub async fn get_public_by_slug(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<BlogPost, AppError> {
        let Some(mut post) = BlogPostRepository::new(self.db)
            .find_by_slug(slug)
            .await?
            .filter(BlogPost::is_public)
        else {
            return Err(AppError::NotFound("Blog post not found".to_string()));
        };

        let txn = self.db.begin().await?;
        BlogPostRepository::new(&txn).increment_views(post.id).await?;
        ViewEventRepository::new(&txn)
            .record(ContentKind::BlogPost, post.id, now)
            .await?;
        txn.commit().await?;

        post.views += 1;
        Ok(post)
    }

    pub async fn get_paginated(
        &self,
        filter: BlogPostFilter,
        page: PageRequest,
    ) -> Result<PaginatedBlogPosts, AppError> {
        let (posts, total) = BlogPostRepository::new(self.db)
            .get_paginated(&filter, page)
            .await?;

        Ok(PaginatedBlogPosts {
            posts,
            total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages(total),
        })
    }

    /// Merges a partial update into the stored post.
    ///
    /// The schedule is checked against the merged status and `publishAt` whenever either
    /// of them is part of the update. An explicit `null` excerpt is re-derived from the
    /// merged content.
    ///
    /// # Returns
    /// - `Ok(BlogPost)` - Updated post
    /// - `Err(AppError::NotFound)` - No post with that id
    /// - `Err(AppError::BadRequest)` - Unknown category or invalid schedule
    pub async fn update(
        &self,
        id: i32,
        params: UpdateBlogPostParams,
        now: DateTime<Utc>,
    ) -> Result<BlogPost, AppError> {
        let txn = self.db.begin().await?;
        let repo = BlogPostRepository::new(&txn);

        let Some(existing) = repo.find_by_id(id).await? else {
            return Err(AppError::NotFound("Blog post not found".to_string()));
        };

        let status = params.status.unwrap_or(existing.status);
        let publish_at = params.publish_at.or(existing.publish_at);
        if params.status.is_some() || params.publish_at.is_some() {
            validate_schedule(status, publish_at, now)?;
        }

        let old_category = existing.category.as_ref().map(|c| c.id);
        let category_id = params.category_id.unwrap_or(old_category);
        if category_id != old_category {
            check_category(&txn, category_id).await?;
        }

        let slug = match params.title.as_deref() {
            Some(title) if title != existing.title => repo.available_slug(title, Some(id)).await?,
            _ => existing.slug.clone(),
        };
        let content = params.content.unwrap_or(existing.content);
        let excerpt = match params.excerpt {
            Some(Some(excerpt)) => excerpt,
            Some(None) => markdown::excerpt(&content),
            None => existing.excerpt,
        };

        let post = repo
            .update(
                id,
                BlogPostChanges {
                    title: params.title.unwrap_or(existing.title),
                    slug,
                    excerpt,
                    content,
                    category_id,
                    cover_image_url: params.cover_image_url.unwrap_or(existing.cover_image_url),
                    status,
                    publish_at,
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

        if existing.deleted_at.is_none() && category_id != old_category {
            let categories = CategoryRepository::new(&txn);
            if let Some(old) = old_category {
                categories.decrement_post_count(old).await?;
            }
            if let Some(new) = category_id {
                categories.increment_post_count(new).await?;
            }
        }

        txn.commit().await?;
        Ok(post)
    }

    /// Soft-deletes a live post and releases its category count.
    pub async fn delete(&self, id: i32, now: DateTime<Utc>) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let repo = BlogPostRepository::new(&txn);

        let Some(post) = repo.find_by_id(id).await?.filter(|p| p.deleted_at.is_none()) else {
            return Err(AppError::NotFound("Blog post not found".to_string()));
        };

        repo.set_deleted_at(id, Some(now)).await?;
        if let Some(category) = &post.category {
            CategoryRepository::new(&txn)
                .decrement_post_count(category.id)
                .await?;
        }

        txn.commit().await?;

        tracing::info!("Soft-deleted blog post {}", id);
        Ok(())
    }

    /// Restores a soft-deleted post. Restoring a live post is a no-op.
    pub async fn restore(&self, id: i32) -> Result<BlogPost, AppError> {
        let txn = self.db.begin().await?;
        let repo = BlogPostRepository::new(&txn);

        let Some(post) = repo.find_by_id(id).await? else {
            return Err(AppError::NotFound("Blog post not found".to_string()));
        };

        if post.deleted_at.is_none() {
            return Ok(post);
        }

        repo.set_deleted_at(id, None).await?;
        if let Some(category) = &post.category {
            CategoryRepository::new(&txn)
                .increment_post_count(category.id)
                .await?;
        }

        let restored = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

        txn.commit().await?;

        tracing::info!("Restored blog post {}", id);
        Ok(restored)
    }

    /// Publishes every scheduled post whose `publish_at` has passed.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of posts published
    pub async fn publish_due(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let published = BlogPostRepository::new(self.db).publish_due(now).await?;

        for id in &published {
            tracing::info!("Published scheduled blog post {}", id);
        }

        Ok(published.len())
    }
}

async fn check_category<C: ConnectionTrait>(
    db: &C,
    category_id: Option<i32>,
) -> Result<(), AppError> {
    if let Some(category_id) = category_id {
        if CategoryRepository::new(db)
            .find_by_id(category_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "category {} does not exist",
                category_id
            )));
        }
    }
    Ok(())
}
