//! Tag domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        comic::TagSummaryDto,
        tag::{CreateTagDto, PaginatedTagsDto, TagCloudEntryDto, TagDto, UpdateTagDto},
    },
    server::{error::AppError, util::validate},
};

/// Comic tag with its denormalized comic counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub slug: String,
    /// Number of non-deleted comics carrying this tag.
    pub comic_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn from_entity(entity: entity::tag::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            comic_count: entity.comic_count,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> TagDto {
        TagDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
            comic_count: self.comic_count,
            created_at: self.created_at,
        }
    }
}

/// Reference to a tag embedded in comic responses.
#[derive(Debug, Clone, PartialEq)]
pub struct TagSummary {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl TagSummary {
    pub fn from_entity(entity: entity::tag::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
        }
    }

    pub fn into_dto(self) -> TagSummaryDto {
        TagSummaryDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
        }
    }
}

/// Tag paired with its font size in the tag cloud.
#[derive(Debug, Clone, PartialEq)]
pub struct TagCloudEntry {
    pub tag: Tag,
    pub font_size: f64,
}

impl TagCloudEntry {
    pub fn into_dto(self) -> TagCloudEntryDto {
        TagCloudEntryDto {
            id: self.tag.id,
            name: self.tag.name,
            slug: self.tag.slug,
            comic_count: self.tag.comic_count,
            font_size: self.font_size,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateTagParams {
    pub name: String,
}

impl CreateTagParams {
    pub fn from_dto(dto: CreateTagDto) -> Result<Self, AppError> {
        Ok(Self {
            name: validate::name(&dto.name)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct UpdateTagParams {
    pub name: String,
}

impl UpdateTagParams {
    pub fn from_dto(dto: UpdateTagDto) -> Result<Self, AppError> {
        Ok(Self {
            name: validate::name(&dto.name)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedTags {
    pub tags: Vec<Tag>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PaginatedTags {
    pub fn into_dto(self) -> PaginatedTagsDto {
        PaginatedTagsDto {
            tags: self.tags.into_iter().map(Tag::into_dto).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}
