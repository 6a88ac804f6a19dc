//! Comic tags and the tag cloud.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::tag::TagRepository,
    error::AppError,
    model::tag::{CreateTagParams, PaginatedTags, Tag, TagCloudEntry, UpdateTagParams},
    util::{pagination::PageRequest, tag_cloud},
};

/// Smallest `comic_count` shown in the cloud when the caller gives none.
pub const DEFAULT_CLOUD_MIN_COUNT: i64 = 1;

pub struct TagService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TagService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateTagParams) -> Result<Tag, AppError> {
        let repo = TagRepository::new(self.db);

        let slug = repo.available_slug(&params.name, None).await?;
        let tag = repo.create(params, slug).await?;

        Ok(tag)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Tag, AppError> {
        TagRepository::new(self.db)
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))
    }

    pub async fn get_paginated(&self, page: PageRequest) -> Result<PaginatedTags, AppError> {
        let (tags, total) = TagRepository::new(self.db).get_all_paginated(page).await?;

        Ok(PaginatedTags {
            tags,
            total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages(total),
        })
    }

    /// Builds the tag cloud.
    ///
    /// Tags used fewer than `min_count` times are left out. Font sizes scale linearly
    /// between the floor and the most used tag; the result is ordered by usage, then name.
    ///
    /// # Arguments
    /// - `min_count` - Usage floor, defaults to 1; values below 0 are rejected
    pub async fn cloud(&self, min_count: Option<i64>) -> Result<Vec<TagCloudEntry>, AppError> {
        let floor = min_count.unwrap_or(DEFAULT_CLOUD_MIN_COUNT);
        if floor < 0 {
            return Err(AppError::BadRequest(
                "minCount must not be negative".to_string(),
            ));
        }

        let tags = TagRepository::new(self.db).get_with_min_count(floor).await?;
        let max_count = tags.iter().map(|t| t.comic_count).max().unwrap_or(floor);

        Ok(tags
            .into_iter()
            .map(|tag| TagCloudEntry {
                font_size: tag_cloud::font_size(tag.comic_count, floor, max_count),
                tag,
            })
            .collect())
    }

    pub async fn update(&self, id: i32, params: UpdateTagParams) -> Result<Tag, AppError> {
        let repo = TagRepository::new(self.db);

        let slug = repo.available_slug(&params.name, Some(id)).await?;

        repo.update(id, params, slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))
    }

    /// Deletes a tag and unlinks it from every comic.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        if !TagRepository::new(&txn).delete(id).await? {
            return Err(AppError::NotFound("Tag not found".to_string()));
        }

        txn.commit().await?;
        Ok(())
    }
}
