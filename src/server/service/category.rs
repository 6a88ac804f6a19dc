//! Blog categories.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::category::CategoryRepository,
    error::AppError,
    model::category::{Category, CreateCategoryParams, PaginatedCategories, UpdateCategoryParams},
    util::pagination::PageRequest,
};

pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateCategoryParams) -> Result<Category, AppError> {
        let repo = CategoryRepository::new(self.db);

        let slug = repo.available_slug(&params.name, None).await?;
        let category = repo.create(params, slug).await?;

        Ok(category)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Category, AppError> {
        CategoryRepository::new(self.db)
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    pub async fn get_paginated(&self, page: PageRequest) -> Result<PaginatedCategories, AppError> {
        let (categories, total) = CategoryRepository::new(self.db)
            .get_all_paginated(page)
            .await?;

        Ok(PaginatedCategories {
            categories,
            total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages(total),
        })
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateCategoryParams,
    ) -> Result<Category, AppError> {
        let repo = CategoryRepository::new(self.db);

        let slug = match params.name.as_deref() {
            Some(name) => Some(repo.available_slug(name, Some(id)).await?),
            None => None,
        };

        repo.update(id, params, slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    /// Deletes a category, leaving its posts uncategorized.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        if !CategoryRepository::new(&txn).delete(id).await? {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        txn.commit().await?;
        Ok(())
    }
}
