//! Comic genres.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::genre::GenreRepository,
    error::AppError,
    model::genre::{CreateGenreParams, Genre, PaginatedGenres, UpdateGenreParams},
    util::pagination::PageRequest,
};

pub struct GenreService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GenreService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a genre with a unique slug derived from its name.
    pub async fn create(&self, params: CreateGenreParams) -> Result<Genre, AppError> {
        let repo = GenreRepository::new(self.db);

        let slug = repo.available_slug(&params.name, None).await?;
        let genre = repo.create(params, slug).await?;

        Ok(genre)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Genre, AppError> {
        GenreRepository::new(self.db)
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))
    }

    pub async fn get_paginated(&self, page: PageRequest) -> Result<PaginatedGenres, AppError> {
        let (genres, total) = GenreRepository::new(self.db)
            .get_all_paginated(page)
            .await?;

        Ok(PaginatedGenres {
            genres,
            total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages(total),
        })
    }

    /// Applies a partial update, regenerating the slug when the name is given.
    ///
    /// # Returns
    /// - `Ok(Genre)` - Updated genre
    /// - `Err(AppError::NotFound)` - No genre with that id
    pub async fn update(&self, id: i32, params: UpdateGenreParams) -> Result<Genre, AppError> {
        let repo = GenreRepository::new(self.db);

        let slug = match params.name.as_deref() {
            Some(name) => Some(repo.available_slug(name, Some(id)).await?),
            None => None,
        };

        repo.update(id, params, slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))
    }

    /// Deletes a genre, leaving its comics without one.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        if !GenreRepository::new(&txn).delete(id).await? {
            return Err(AppError::NotFound("Genre not found".to_string()));
        }

        txn.commit().await?;
        Ok(())
    }
}
