//! Blog category domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        blog::CategorySummaryDto,
        category::{CategoryDto, CreateCategoryDto, PaginatedCategoriesDto, UpdateCategoryDto},
    },
    server::{error::AppError, util::validate},
};

const DESCRIPTION_MAX: usize = 2000;

/// Blog category with its denormalized post counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Number of non-deleted posts in this category.
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn from_entity(entity: entity::category::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            description: entity.description,
            post_count: entity.post_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> CategoryDto {
        CategoryDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            post_count: self.post_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Reference to a category embedded in blog post responses.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl CategorySummary {
    pub fn from_entity(entity: entity::category::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
        }
    }

    pub fn into_dto(self) -> CategorySummaryDto {
        CategorySummaryDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCategoryParams {
    pub name: String,
    pub description: Option<String>,
}

impl CreateCategoryParams {
    pub fn from_dto(dto: CreateCategoryDto) -> Result<Self, AppError> {
        Ok(Self {
            name: validate::name(&dto.name)?,
            description: validate::optional_text("description", dto.description, DESCRIPTION_MAX)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryParams {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl UpdateCategoryParams {
    pub fn from_dto(dto: UpdateCategoryDto) -> Result<Self, AppError> {
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
pub struct PaginatedCategories {
    pub categories: Vec<Category>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PaginatedCategories {
    pub fn into_dto(self) -> PaginatedCategoriesDto {
        PaginatedCategoriesDto {
            categories: self.categories.into_iter().map(Category::into_dto).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}
