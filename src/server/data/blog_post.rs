//! Blog post data repository.
//!
//! Posts are returned with their category and author resolved. Category counter
//! maintenance is the caller's job so it can share a transaction with the write.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use entity::blog_post::PostStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::server::{
    data::{counter, slug::available_slug},
    model::{
        blog::{BlogPost, BlogPostFilter},
        sort::ContentSort,
    },
    util::pagination::PageRequest,
};

/// Fully resolved values for inserting a post.
#[derive(Debug, Clone)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub author_id: Option<i32>,
    pub category_id: Option<i32>,
    pub cover_image_url: Option<String>,
    pub status: PostStatus,
    pub publish_at: Option<DateTime<Utc>>,
}

/// Fully resolved values for rewriting a post. The service merges the partial update
/// with the stored post before calling [`BlogPostRepository::update`].
#[derive(Debug, Clone)]
pub struct BlogPostChanges {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category_id: Option<i32>,
    pub cover_image_url: Option<String>,
    pub status: PostStatus,
    pub publish_at: Option<DateTime<Utc>>,
}

pub struct BlogPostRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BlogPostRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn available_slug(&self, title: &str, exclude_id: Option<i32>) -> Result<String, DbErr> {
        available_slug::<entity::prelude::BlogPost, C>(
            self.db,
            entity::blog_post::Column::Slug,
            entity::blog_post::Column::Id,
            title,
            exclude_id,
        )
        .await
    }

    /// Inserts a post. A post created as published gets `published_at = now`.
    pub async fn create(&self, post: NewBlogPost) -> Result<BlogPost, DbErr> {
        let now = Utc::now();
        let published_at = (post.status == PostStatus::Published).then_some(now);

        let entity = entity::blog_post::ActiveModel {
            title: ActiveValue::Set(post.title),
            slug: ActiveValue::Set(post.slug),
            excerpt: ActiveValue::Set(post.excerpt),
            content: ActiveValue::Set(post.content),
            author_id: ActiveValue::Set(post.author_id),
            category_id: ActiveValue::Set(post.category_id),
            cover_image_url: ActiveValue::Set(post.cover_image_url),
            status: ActiveValue::Set(post.status),
            publish_at: ActiveValue::Set(post.publish_at),
            published_at: ActiveValue::Set(published_at),
            views: ActiveValue::Set(0),
            likes: ActiveValue::Set(0),
            deleted_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut posts = self.load_relations(vec![entity]).await?;
        posts.pop().ok_or(DbErr::RecordNotFound(
            "Blog post not found after creation".to_string(),
        ))
    }

    /// Finds a post by id, including soft-deleted ones.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<BlogPost>, DbErr> {
        let Some(post) = entity::prelude::BlogPost::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(self.load_relations(vec![post]).await?.pop())
    }

    /// Finds a post by slug, including soft-deleted ones.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, DbErr> {
        let Some(post) = entity::prelude::BlogPost::find()
            .filter(entity::blog_post::Column::Slug.eq(slug))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.load_relations(vec![post]).await?.pop())
    }

    /// Whether a post exists and is not soft-deleted.
    pub async fn exists_live(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::BlogPost::find()
            .filter(entity::blog_post::Column::Id.eq(id))
            .filter(entity::blog_post::Column::DeletedAt.is_null())
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets a page of posts matching `filter`.
    ///
    /// An unknown category slug yields an empty page rather than an error.
    ///
    /// # Returns
    /// - `Ok((posts, total))` - Posts for the requested page and the total match count
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_paginated(
        &self,
        filter: &BlogPostFilter,
        page: PageRequest,
    ) -> Result<(Vec<BlogPost>, u64), DbErr> {
        let mut query = entity::prelude::BlogPost::find();

        if filter.public_only {
            query = query
                .filter(entity::blog_post::Column::Status.eq(PostStatus::Published))
                .filter(entity::blog_post::Column::DeletedAt.is_null());
        } else {
            query = if filter.deleted {
                query.filter(entity::blog_post::Column::DeletedAt.is_not_null())
            } else {
                query.filter(entity::blog_post::Column::DeletedAt.is_null())
            };
            if let Some(status) = filter.status {
                query = query.filter(entity::blog_post::Column::Status.eq(status));
            }
        }

        if let Some(slug) = &filter.category_slug {
            let Some(category) = entity::prelude::Category::find()
                .filter(entity::category::Column::Slug.eq(slug.as_str()))
                .one(self.db)
                .await?
            else {
                return Ok((Vec::new(), 0));
            };
            query = query.filter(entity::blog_post::Column::CategoryId.eq(category.id));
        }

        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(entity::blog_post::Column::Title.contains(search.as_str()))
                    .add(entity::blog_post::Column::Excerpt.contains(search.as_str())),
            );
        }

        let paginator = sorted(query, filter.sort).paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;
        let posts = self.load_relations(entities).await?;

        Ok((posts, total))
    }

    /// Rewrites a post's editable fields.
    ///
    /// `published_at` is stamped the first time the post becomes published.
    ///
    /// # Returns
    /// - `Ok(Some(BlogPost))` - Updated post
    /// - `Ok(None)` - No post with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        id: i32,
        changes: BlogPostChanges,
    ) -> Result<Option<BlogPost>, DbErr> {
        let Some(post) = entity::prelude::BlogPost::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let first_publish = changes.status == PostStatus::Published && post.published_at.is_none();

        let mut active_model: entity::blog_post::ActiveModel = post.into();
        active_model.title = ActiveValue::Set(changes.title);
        active_model.slug = ActiveValue::Set(changes.slug);
        active_model.excerpt = ActiveValue::Set(changes.excerpt);
        active_model.content = ActiveValue::Set(changes.content);
        active_model.category_id = ActiveValue::Set(changes.category_id);
        active_model.cover_image_url = ActiveValue::Set(changes.cover_image_url);
        active_model.status = ActiveValue::Set(changes.status);
        active_model.publish_at = ActiveValue::Set(changes.publish_at);
        if first_publish {
            active_model.published_at = ActiveValue::Set(Some(now));
        }
        active_model.updated_at = ActiveValue::Set(now);

        let entity = active_model.update(self.db).await?;

        Ok(self.load_relations(vec![entity]).await?.pop())
    }

    /// Sets or clears `deleted_at`.
    ///
    /// # Returns
    /// - `Ok(true)` - Row updated
    /// - `Ok(false)` - No post with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_deleted_at(
        &self,
        id: i32,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::BlogPost::update_many()
            .set(entity::blog_post::ActiveModel {
                deleted_at: ActiveValue::Set(deleted_at),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            })
            .filter(entity::blog_post::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn increment_views(&self, id: i32) -> Result<(), DbErr> {
        counter::increment::<entity::prelude::BlogPost, C>(
            self.db,
            entity::blog_post::Column::Views,
            entity::blog_post::Column::Id,
            &[id],
        )
        .await?;
        Ok(())
    }

    /// Publishes every scheduled post whose `publish_at` has passed.
    ///
    /// Each post gets `published_at = publish_at`. Soft-deleted posts are published as
    /// well so a later restore brings them back in the expected state.
    ///
    /// # Arguments
    /// - `now` - Cut-off instant
    ///
    /// # Returns
    /// - `Ok(Vec<i32>)` - Ids of the posts that were published
    /// - `Err(DbErr)` - Database error during query or update
    pub async fn publish_due(&self, now: DateTime<Utc>) -> Result<Vec<i32>, DbErr> {
        let due = entity::prelude::BlogPost::find()
            .filter(entity::blog_post::Column::Status.eq(PostStatus::Scheduled))
            .filter(entity::blog_post::Column::PublishAt.lte(now))
            .order_by_asc(entity::blog_post::Column::PublishAt)
            .all(self.db)
            .await?;

        let mut published = Vec::with_capacity(due.len());
        for post in due {
            let id = post.id;
            let publish_at = post.publish_at;

            let mut active_model: entity::blog_post::ActiveModel = post.into();
            active_model.status = ActiveValue::Set(PostStatus::Published);
            active_model.published_at = ActiveValue::Set(publish_at.or(Some(now)));
            active_model.updated_at = ActiveValue::Set(now);
            active_model.update(self.db).await?;

            published.push(id);
        }

        Ok(published)
    }

    /// Resolves category and author for a batch of posts, keeping the input order.
    async fn load_relations(
        &self,
        posts: Vec<entity::blog_post::Model>,
    ) -> Result<Vec<BlogPost>, DbErr> {
        let category_ids: Vec<i32> = posts.iter().filter_map(|p| p.category_id).collect();
        let author_ids: Vec<i32> = posts.iter().filter_map(|p| p.author_id).collect();

        let categories: HashMap<i32, entity::category::Model> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::Category::find()
                .filter(entity::category::Column::Id.is_in(category_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|c| (c.id, c))
                .collect()
        };

        let authors: HashMap<i32, entity::user::Model> = if author_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::User::find()
                .filter(entity::user::Column::Id.is_in(author_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|u| (u.id, u))
                .collect()
        };

        Ok(posts
            .into_iter()
            .map(|post| {
                let category = post.category_id.and_then(|id| categories.get(&id).cloned());
                let author = post.author_id.and_then(|id| authors.get(&id).cloned());
                BlogPost::from_parts(post, category, author)
            })
            .collect())
    }
}

fn sorted(
    query: Select<entity::prelude::BlogPost>,
    sort: ContentSort,
) -> Select<entity::prelude::BlogPost> {
    use entity::blog_post::Column;

    match sort {
        ContentSort::Newest => query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id),
        ContentSort::Oldest => query
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id),
        ContentSort::Popular => query
            .order_by_desc(Column::Views)
            .order_by_desc(Column::Id),
        ContentSort::Liked => query
            .order_by_desc(Column::Likes)
            .order_by_desc(Column::Id),
        ContentSort::Title => query.order_by_asc(Column::Title).order_by_asc(Column::Id),
    }
}
