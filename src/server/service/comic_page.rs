//! Pages of a comic.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{comic::ComicRepository, comic_page::ComicPageRepository},
    error::AppError,
    model::comic::{ComicPage, CreateComicPageParams, UpdateComicPageParams},
};

pub struct ComicPageService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ComicPageService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists pages in page-number order.
    ///
    /// # Arguments
    /// - `comic_id` - Owning comic
    /// - `public_only` - Hide pages of unpublished or deleted comics
    pub async fn list(&self, comic_id: i32, public_only: bool) -> Result<Vec<ComicPage>, AppError> {
        let comic = ComicRepository::new(self.db).find_by_id(comic_id).await?;
        let visible = comic.is_some_and(|c| !public_only || c.is_public());
        if !visible {
            return Err(AppError::NotFound("Comic not found".to_string()));
        }

        Ok(ComicPageRepository::new(self.db)
            .get_by_comic_id(comic_id)
            .await?)
    }

    /// Adds a page, appending after the last one when no number is given.
    ///
    /// # Returns
    /// - `Ok(ComicPage)` - Created page
    /// - `Err(AppError::NotFound)` - No comic with that id
    /// - `Err(AppError::BadRequest)` - Page number already used on this comic, or the last
    ///   page already holds the largest number
    pub async fn create(
        &self,
        comic_id: i32,
        params: CreateComicPageParams,
    ) -> Result<ComicPage, AppError> {
        self.require_comic(comic_id).await?;
        let repo = ComicPageRepository::new(self.db);

        let page_number = match params.page_number {
            Some(number) => {
                if repo.page_number_taken(comic_id, number, None).await? {
                    return Err(duplicate_page(number));
                }
                number
            }
            None => repo
                .last_page_number(comic_id)
                .await?
                .unwrap_or(0)
                .checked_add(1)
                .ok_or_else(|| {
                    AppError::BadRequest("no page number left after the last page".to_string())
                })?,
        };

        Ok(repo
            .create(comic_id, page_number, params.image_url, params.caption)
            .await?)
    }

    pub async fn update(
        &self,
        comic_id: i32,
        page_id: i32,
        params: UpdateComicPageParams,
    ) -> Result<ComicPage, AppError> {
        self.require_comic(comic_id).await?;
        let repo = ComicPageRepository::new(self.db);

        if let Some(number) = params.page_number {
            if repo.page_number_taken(comic_id, number, Some(page_id)).await? {
                return Err(duplicate_page(number));
            }
        }

        repo.update(comic_id, page_id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Page not found".to_string()))
    }

    pub async fn delete(&self, comic_id: i32, page_id: i32) -> Result<(), AppError> {
        if !ComicPageRepository::new(self.db)
            .delete(comic_id, page_id)
            .await?
        {
            return Err(AppError::NotFound("Page not found".to_string()));
        }

        Ok(())
    }

    async fn require_comic(&self, comic_id: i32) -> Result<(), AppError> {
        if ComicRepository::new(self.db)
            .find_by_id(comic_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Comic not found".to_string()));
        }
        Ok(())
    }
}

fn duplicate_page(number: i32) -> AppError {
    AppError::BadRequest(format!("page {} already exists", number))
}
