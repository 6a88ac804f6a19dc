//! Genre domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        comic::GenreSummaryDto,
        genre::{CreateGenreDto, GenreDto, PaginatedGenresDto, UpdateGenreDto},
    },
    server::{error::AppError, util::validate},
};

const DESCRIPTION_MAX: usize = 2000;

/// Comic genre with its denormalized comic counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Number of non-deleted comics in this genre.
    pub comic_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Genre {
    pub fn from_entity(entity: entity::genre::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            description: entity.description,
            comic_count: entity.comic_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> GenreDto {
        GenreDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            comic_count: self.comic_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Reference to a genre embedded in comic responses.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreSummary {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl GenreSummary {
    pub fn from_entity(entity: entity::genre::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
        }
    }

    pub fn into_dto(self) -> GenreSummaryDto {
        GenreSummaryDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateGenreParams {
    pub name: String,
    pub description: Option<String>,
}

impl CreateGenreParams {
    pub fn from_dto(dto: CreateGenreDto) -> Result<Self, AppError> {
        Ok(Self {
            name: validate::name(&dto.name)?,
            description: validate::optional_text("description", dto.description, DESCRIPTION_MAX)?,
        })
    }
}

/// Partial genre update; a new name also regenerates the slug.
#[derive(Debug, Clone, Default)]
pub struct UpdateGenreParams {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl UpdateGenreParams {
    pub fn from_dto(dto: UpdateGenreDto) -> Result<Self, AppError> {
        Ok(Self {
            name: dto.name.as_deref().map(validate::name).transpose()?,
            description: dto
                .description
                .map(|d| validate::optional_text("description", d, DESCRIPTION_MAX))
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedGenres {
    pub genres: Vec<Genre>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PaginatedGenres {
    pub fn into_dto(self) -> PaginatedGenresDto {
        PaginatedGenresDto {
            genres: self.genres.into_iter().map(Genre::into_dto).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}
