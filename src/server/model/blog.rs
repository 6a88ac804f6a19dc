//! Blog post domain models and parameters.

use chrono::{DateTime, Utc};
use entity::blog_post::PostStatus;

use crate::{
    model::blog::{
        AuthorSummaryDto, BlogPostDto, BlogPostListItemDto, CreateBlogPostDto,
        PaginatedBlogPostsDto, PostStatusDto, UpdateBlogPostDto,
    },
    server::{
        error::AppError,
        model::{category::CategorySummary, sort::ContentSort},
        util::{markdown, validate},
    },
};

const TITLE_MAX: usize = 200;
const EXCERPT_MAX: usize = 500;
const CONTENT_MAX: usize = 100_000;

/// Blog post with its category and author resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    /// Markdown source.
    pub content: String,
    pub author: Option<AuthorSummary>,
    pub category: Option<CategorySummary>,
    pub cover_image_url: Option<String>,
    pub status: PostStatus,
    /// Instant a scheduled post goes live.
    pub publish_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub likes: i64,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    pub fn from_parts(
        entity: entity::blog_post::Model,
        category: Option<entity::category::Model>,
        author: Option<entity::user::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            slug: entity.slug,
            excerpt: entity.excerpt,
            content: entity.content,
            author: author.map(AuthorSummary::from_entity),
            category: category.map(CategorySummary::from_entity),
            cover_image_url: entity.cover_image_url,
            status: entity.status,
            publish_at: entity.publish_at,
            published_at: entity.published_at,
            views: entity.views,
            likes: entity.likes,
            deleted_at: entity.deleted_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Whether anonymous readers may see the post.
    pub fn is_public(&self) -> bool {
        self.status == PostStatus::Published && self.deleted_at.is_none()
    }

    /// Full representation with rendered HTML and reading time.
    pub fn into_dto(self) -> BlogPostDto {
        BlogPostDto {
            id: self.id,
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            content_html: markdown::render_html(&self.content),
            reading_time_minutes: markdown::reading_time_minutes(&self.content),
            content: self.content,
            author: self.author.map(AuthorSummary::into_dto),
            category: self.category.map(CategorySummary::into_dto),
            cover_image_url: self.cover_image_url,
            status: self.status.into(),
            publish_at: self.publish_at,
            published_at: self.published_at,
            views: self.views,
            likes: self.likes,
            deleted_at: self.deleted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Listing representation without the body.
    pub fn into_list_item_dto(self) -> BlogPostListItemDto {
        BlogPostListItemDto {
            id: self.id,
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            reading_time_minutes: markdown::reading_time_minutes(&self.content),
            author: self.author.map(AuthorSummary::into_dto),
            category: self.category.map(CategorySummary::into_dto),
            cover_image_url: self.cover_image_url,
            status: self.status.into(),
            publish_at: self.publish_at,
            published_at: self.published_at,
            views: self.views,
            likes: self.likes,
            created_at: self.created_at,
        }
    }
}

/// Public author reference; never carries the email.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorSummary {
    pub id: i32,
    pub username: String,
}

impl AuthorSummary {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
        }
    }

    pub fn into_dto(self) -> AuthorSummaryDto {
        AuthorSummaryDto {
            id: self.id,
            username: self.username,
        }
    }
}

impl From<PostStatus> for PostStatusDto {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Draft => PostStatusDto::Draft,
            PostStatus::Scheduled => PostStatusDto::Scheduled,
            PostStatus::Published => PostStatusDto::Published,
        }
    }
}

impl From<PostStatusDto> for PostStatus {
    fn from(status: PostStatusDto) -> Self {
        match status {
            PostStatusDto::Draft => PostStatus::Draft,
            PostStatusDto::Scheduled => PostStatus::Scheduled,
            PostStatusDto::Published => PostStatus::Published,
        }
    }
}

/// Checks that a scheduled post has a `publish_at` in the future.
///
/// # Returns
/// - `Ok(())` - Status is not scheduled, or `publish_at` lies after `now`
/// - `Err(AppError::BadRequest)` - Scheduled without a date or with a past date
pub fn validate_schedule(
    status: PostStatus,
    publish_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if status != PostStatus::Scheduled {
        return Ok(());
    }

    match publish_at {
        None => Err(AppError::BadRequest(
            "publishAt is required for scheduled posts".to_string(),
        )),
        Some(at) if at <= now => Err(AppError::BadRequest(
            "publishAt must be in the future".to_string(),
        )),
        Some(_) => Ok(()),
    }
}

/// Listing filter for blog posts.
#[derive(Debug, Clone, Default)]
pub struct BlogPostFilter {
    /// Restrict to published, non-deleted posts.
    pub public_only: bool,
    pub category_slug: Option<String>,
    pub search: Option<String>,
    /// Admin only: restrict to one status.
    pub status: Option<PostStatus>,
    /// Admin only: list soft-deleted posts instead of live ones.
    pub deleted: bool,
    pub sort: ContentSort,
}

#[derive(Debug, Clone)]
pub struct CreateBlogPostParams {
    pub title: String,
    pub content: String,
    /// Explicit excerpt; derived from the content when `None`.
    pub excerpt: Option<String>,
    pub author_id: Option<i32>,
    pub category_id: Option<i32>,
    pub cover_image_url: Option<String>,
    pub status: PostStatus,
    pub publish_at: Option<DateTime<Utc>>,
}

impl CreateBlogPostParams {
    /// Validates a create request on behalf of `author_id`.
    pub fn from_dto(
        dto: CreateBlogPostDto,
        author_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        let status: PostStatus = dto.status.map(Into::into).unwrap_or(PostStatus::Draft);
        validate_schedule(status, dto.publish_at, now)?;

        Ok(Self {
            title: validate::text("title", &dto.title, 1, TITLE_MAX)?,
            content: validate::text("content", &dto.content, 1, CONTENT_MAX)?,
            excerpt: validate::optional_text("excerpt", dto.excerpt, EXCERPT_MAX)?,
            author_id: Some(author_id),
            category_id: dto.category_id,
            cover_image_url: dto
                .cover_image_url
                .as_deref()
                .map(|u| validate::url("coverImageUrl", u))
                .transpose()?,
            status,
            publish_at: dto.publish_at,
        })
    }
}

/// Partial blog post update. Schedule rules are checked by the service once the
/// update is merged with the stored post.
#[derive(Debug, Clone, Default)]
pub struct UpdateBlogPostParams {
    pub title: Option<String>,
    pub content: Option<String>,
    /// `Some(None)` regenerates the excerpt from the (new) content.
    pub excerpt: Option<Option<String>>,
    pub category_id: Option<Option<i32>>,
    pub cover_image_url: Option<Option<String>>,
    pub status: Option<PostStatus>,
    pub publish_at: Option<DateTime<Utc>>,
}

impl UpdateBlogPostParams {
    pub fn from_dto(dto: UpdateBlogPostDto) -> Result<Self, AppError> {
        Ok(Self {
            title: dto
                .title
                .as_deref()
                .map(|t| validate::text("title", t, 1, TITLE_MAX))
                .transpose()?,
            content: dto
                .content
                .as_deref()
                .map(|c| validate::text("content", c, 1, CONTENT_MAX))
                .transpose()?,
            excerpt: dto
                .excerpt
                .map(|e| validate::optional_text("excerpt", e, EXCERPT_MAX))
                .transpose()?,
            category_id: dto.category_id,
            cover_image_url: dto
                .cover_image_url
                .map(|u| {
                    u.as_deref()
                        .map(|u| validate::url("coverImageUrl", u))
                        .transpose()
                })
                .transpose()?,
            status: dto.status.map(Into::into),
            publish_at: dto.publish_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedBlogPosts {
    pub posts: Vec<BlogPost>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PaginatedBlogPosts {
    pub fn into_dto(self) -> PaginatedBlogPostsDto {
        PaginatedBlogPostsDto {
            posts: self
                .posts
                .into_iter()
                .map(BlogPost::into_list_item_dto)
                .collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn drafts_need_no_schedule() {
        assert!(validate_schedule(PostStatus::Draft, None, Utc::now()).is_ok());
    }

    #[test]
    fn scheduled_requires_future_date() {
        let now = Utc::now();

        assert!(validate_schedule(PostStatus::Scheduled, None, now).is_err());
        assert!(
            validate_schedule(PostStatus::Scheduled, Some(now - Duration::minutes(1)), now)
                .is_err()
        );
        assert!(
            validate_schedule(PostStatus::Scheduled, Some(now + Duration::hours(1)), now).is_ok()
        );
    }
}
