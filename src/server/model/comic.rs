//! Comic and comic page domain models and parameters.

use chrono::{DateTime, Utc};
use entity::comic::ComicStatus;

use crate::{
    model::comic::{
        ComicDto, ComicPageDto, ComicStatusDto, CreateComicDto, CreateComicPageDto,
        PaginatedComicsDto, UpdateComicDto, UpdateComicPageDto,
    },
    server::{
        error::AppError,
        model::{genre::GenreSummary, sort::ContentSort, tag::TagSummary},
        util::validate,
    },
};

const TITLE_MAX: usize = 200;
const AUTHOR_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 5000;
const CAPTION_MAX: usize = 500;

/// Comic with its genre and tags resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Comic {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub author: String,
    pub cover_image_url: Option<String>,
    pub genre: Option<GenreSummary>,
    pub tags: Vec<TagSummary>,
    pub status: ComicStatus,
    pub views: i64,
    pub likes: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comic {
    /// Builds the domain model from a comic row and its related rows.
    ///
    /// # Arguments
    /// - `entity` - The comic row
    /// - `genre` - Genre row referenced by `genre_id`, if any
    /// - `tags` - Tag rows linked through `comic_tag`
    pub fn from_parts(
        entity: entity::comic::Model,
        genre: Option<entity::genre::Model>,
        tags: Vec<entity::tag::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            slug: entity.slug,
            description: entity.description,
            author: entity.author,
            cover_image_url: entity.cover_image_url,
            genre: genre.map(GenreSummary::from_entity),
            tags: tags.into_iter().map(TagSummary::from_entity).collect(),
            status: entity.status,
            views: entity.views,
            likes: entity.likes,
            published_at: entity.published_at,
            deleted_at: entity.deleted_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Whether anonymous readers may see the comic.
    pub fn is_public(&self) -> bool {
        self.status == ComicStatus::Published && self.deleted_at.is_none()
    }

    pub fn into_dto(self) -> ComicDto {
        ComicDto {
            id: self.id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            author: self.author,
            cover_image_url: self.cover_image_url,
            genre: self.genre.map(GenreSummary::into_dto),
            tags: self.tags.into_iter().map(TagSummary::into_dto).collect(),
            status: self.status.into(),
            views: self.views,
            likes: self.likes,
            published_at: self.published_at,
            deleted_at: self.deleted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<ComicStatus> for ComicStatusDto {
    fn from(status: ComicStatus) -> Self {
        match status {
            ComicStatus::Draft => ComicStatusDto::Draft,
            ComicStatus::Published => ComicStatusDto::Published,
            ComicStatus::Archived => ComicStatusDto::Archived,
        }
    }
}

impl From<ComicStatusDto> for ComicStatus {
    fn from(status: ComicStatusDto) -> Self {
        match status {
            ComicStatusDto::Draft => ComicStatus::Draft,
            ComicStatusDto::Published => ComicStatus::Published,
            ComicStatusDto::Archived => ComicStatus::Archived,
        }
    }
}

/// Listing filter for comics.
///
/// Public callers always get `public_only = true`; the remaining admin-only fields are
/// ignored in that case.
#[derive(Debug, Clone, Default)]
pub struct ComicFilter {
    /// Restrict to published, non-deleted comics.
    pub public_only: bool,
    pub genre_slug: Option<String>,
    pub tag_slug: Option<String>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    /// Admin only: restrict to one status.
    pub status: Option<ComicStatus>,
    /// Admin only: list soft-deleted comics instead of live ones.
    pub deleted: bool,
    pub sort: ContentSort,
}

#[derive(Debug, Clone)]
pub struct CreateComicParams {
    pub title: String,
    pub description: String,
    pub author: String,
    pub cover_image_url: Option<String>,
    pub genre_id: Option<i32>,
    pub tag_ids: Vec<i32>,
    pub status: ComicStatus,
}

impl CreateComicParams {
    pub fn from_dto(dto: CreateComicDto) -> Result<Self, AppError> {
        let mut tag_ids = dto.tag_ids;
        tag_ids.sort_unstable();
        tag_ids.dedup();

        Ok(Self {
            title: validate::text("title", &dto.title, 1, TITLE_MAX)?,
            description: validate::text("description", &dto.description, 0, DESCRIPTION_MAX)?,
            author: validate::text("author", &dto.author, 1, AUTHOR_MAX)?,
            cover_image_url: dto
                .cover_image_url
                .as_deref()
                .map(|u| validate::url("coverImageUrl", u))
                .transpose()?,
            genre_id: dto.genre_id,
            tag_ids,
            status: dto.status.map(Into::into).unwrap_or(ComicStatus::Draft),
        })
    }
}

/// Partial comic update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateComicParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub cover_image_url: Option<Option<String>>,
    pub genre_id: Option<Option<i32>>,
    pub tag_ids: Option<Vec<i32>>,
    pub status: Option<ComicStatus>,
}

impl UpdateComicParams {
    pub fn from_dto(dto: UpdateComicDto) -> Result<Self, AppError> {
        Ok(Self {
            title: dto
                .title
                .as_deref()
                .map(|t| validate::text("title", t, 1, TITLE_MAX))
                .transpose()?,
            description: dto
                .description
                .as_deref()
                .map(|d| validate::text("description", d, 0, DESCRIPTION_MAX))
                .transpose()?,
            author: dto
                .author
                .as_deref()
                .map(|a| validate::text("author", a, 1, AUTHOR_MAX))
                .transpose()?,
            cover_image_url: dto
                .cover_image_url
                .map(|u| {
                    u.as_deref()
                        .map(|u| validate::url("coverImageUrl", u))
                        .transpose()
                })
                .transpose()?,
            genre_id: dto.genre_id,
            tag_ids: dto.tag_ids.map(|mut ids| {
                ids.sort_unstable();
                ids.dedup();
                ids
            }),
            status: dto.status.map(Into::into),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedComics {
    pub comics: Vec<Comic>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PaginatedComics {
    pub fn into_dto(self) -> PaginatedComicsDto {
        PaginatedComicsDto {
            comics: self.comics.into_iter().map(Comic::into_dto).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

/// Single page image of a comic.
#[derive(Debug, Clone, PartialEq)]
pub struct ComicPage {
    pub id: i32,
    pub comic_id: i32,
    pub page_number: i32,
    pub image_url: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ComicPage {
    pub fn from_entity(entity: entity::comic_page::Model) -> Self {
        Self {
            id: entity.id,
            comic_id: entity.comic_id,
            page_number: entity.page_number,
            image_url: entity.image_url,
            caption: entity.caption,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ComicPageDto {
        ComicPageDto {
            id: self.id,
            comic_id: self.comic_id,
            page_number: self.page_number,
            image_url: self.image_url,
            caption: self.caption,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateComicPageParams {
    /// Explicit position; `None` appends after the last page.
    pub page_number: Option<i32>,
    pub image_url: String,
    pub caption: Option<String>,
}

impl CreateComicPageParams {
    pub fn from_dto(dto: CreateComicPageDto) -> Result<Self, AppError> {
        Ok(Self {
            page_number: dto.page_number.map(page_number).transpose()?,
            image_url: validate::url("imageUrl", &dto.image_url)?,
            caption: validate::optional_text("caption", dto.caption, CAPTION_MAX)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateComicPageParams {
    pub page_number: Option<i32>,
    pub image_url: Option<String>,
    pub caption: Option<Option<String>>,
}

impl UpdateComicPageParams {
    pub fn from_dto(dto: UpdateComicPageDto) -> Result<Self, AppError> {
        Ok(Self {
            page_number: dto.page_number.map(page_number).transpose()?,
            image_url: dto
                .image_url
                .as_deref()
                .map(|u| validate::url("imageUrl", u))
                .transpose()?,
            caption: dto
                .caption
                .map(|c| validate::optional_text("caption", c, CAPTION_MAX))
                .transpose()?,
        })
    }
}

fn page_number(value: i32) -> Result<i32, AppError> {
    if value < 1 {
        return Err(AppError::BadRequest(
            "pageNumber must be at least 1".to_string(),
        ));
    }
    Ok(value)
}
