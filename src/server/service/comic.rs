//! Comic management and public reads.
//!
//! Every write that changes which genre or tags a live comic references adjusts the
//! `comic_count` of those rows in the same transaction. Soft-deleted comics do not count,
//! so delete and restore move the counters as well.

use chrono::{DateTime, Utc};
use entity::view_event::ContentKind;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        comic::ComicRepository, genre::GenreRepository, tag::TagRepository,
        view::ViewEventRepository,
    },
    error::AppError,
    model::comic::{Comic, ComicFilter, CreateComicParams, PaginatedComics, UpdateComicParams},
    util::pagination::PageRequest,
};

pub struct ComicService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ComicService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a comic and counts it towards its genre and tags.
    ///
    /// # Returns
    /// - `Ok(Comic)` - Created comic with relations
    /// - `Err(AppError::BadRequest)` - Unknown genre or tag id
    pub async fn create(&self, params: CreateComicParams) -> Result<Comic, AppError> {
        let txn = self.db.begin().await?;

        check_references(&txn, params.genre_id, &params.tag_ids).await?;

        let repo = ComicRepository::new(&txn);
        let slug = repo.available_slug(&params.title, None).await?;
        let genre_id = params.genre_id;
        let tag_ids = params.tag_ids.clone();
        let comic = repo.create(params, slug).await?;

        if let Some(genre_id) = genre_id {
            GenreRepository::new(&txn)
                .increment_comic_count(genre_id)
                .await?;
        }
        TagRepository::new(&txn)
            .increment_comic_count(&tag_ids)
            .await?;

        txn.commit().await?;

        tracing::info!("Created comic {} ({})", comic.id, comic.slug);
        Ok(comic)
    }

    /// Admin read by id, soft-deleted comics included. Does not count as a view.
    pub async fn get_by_id(&self, id: i32) -> Result<Comic, AppError> {
        ComicRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comic not found".to_string()))
    }

    /// Public read by slug.
    ///
    /// Only published, non-deleted comics are visible. Each successful read increments
    /// `views` and appends a view event.
    ///
    /// # Returns
    /// - `Ok(Comic)` - Comic with the incremented view count
    /// - `Err(AppError::NotFound)` - Unknown slug, draft, archived or deleted comic
    pub async fn get_public_by_slug(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<Comic, AppError> {
        let repo = ComicRepository::new(self.db);

        let Some(mut comic) = repo.find_by_slug(slug).await?.filter(Comic::is_public) else {
            return Err(AppError::NotFound("Comic not found".to_string()));
        };

        let txn = self.db.begin().await?;
        ComicRepository::new(&txn).increment_views(comic.id).await?;
        ViewEventRepository::new(&txn)
            .record(ContentKind::Comic, comic.id, now)
            .await?;
        txn.commit().await?;

        comic.views += 1;
        Ok(comic)
    }

    pub async fn get_paginated(
        &self,
        filter: ComicFilter,
        page: PageRequest,
    ) -> Result<PaginatedComics, AppError> {
        let (comics, total) = ComicRepository::new(self.db)
            .get_paginated(&filter, page)
            .await?;

        Ok(PaginatedComics {
            comics,
            total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages(total),
        })
    }

    /// Applies a partial update.
    ///
    /// For a live comic, a genre change moves one count from the old genre to the new one
    /// and a tag change decrements removed tags and increments added ones.
    ///
    /// # Returns
    /// - `Ok(Comic)` - Updated comic
    /// - `Err(AppError::NotFound)` - No comic with that id
    /// - `Err(AppError::BadRequest)` - Unknown genre or tag id
    pub async fn update(&self, id: i32, params: UpdateComicParams) -> Result<Comic, AppError> {
        let txn = self.db.begin().await?;
        let repo = ComicRepository::new(&txn);

        let Some(existing) = repo.find_by_id(id).await? else {
            return Err(AppError::NotFound("Comic not found".to_string()));
        };

        check_references(
            &txn,
            params.genre_id.flatten(),
            params.tag_ids.as_deref().unwrap_or_default(),
        )
        .await?;

        let slug = match params.title.as_deref() {
            Some(title) if title != existing.title => {
                Some(repo.available_slug(title, Some(id)).await?)
            }
            _ => None,
        };

        let old_genre = existing.genre.as_ref().map(|g| g.id);
        let old_tags: Vec<i32> = existing.tags.iter().map(|t| t.id).collect();
        let new_genre = params.genre_id;
        let new_tags = params.tag_ids.clone();

        let comic = repo
            .update(id, params, slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Comic not found".to_string()))?;

        if existing.deleted_at.is_none() {
            if let Some(new_genre) = new_genre {
                if new_genre != old_genre {
                    move_genre_count(&txn, old_genre, new_genre).await?;
                }
            }
            if let Some(new_tags) = new_tags {
                let removed: Vec<i32> = old_tags
                    .iter()
                    .copied()
                    .filter(|t| !new_tags.contains(t))
                    .collect();
                let added: Vec<i32> = new_tags
                    .iter()
                    .copied()
                    .filter(|t| !old_tags.contains(t))
                    .collect();

                let tags = TagRepository::new(&txn);
                tags.decrement_comic_count(&removed).await?;
                tags.increment_comic_count(&added).await?;
            }
        }

        txn.commit().await?;
        Ok(comic)
    }

    /// Soft-deletes a live comic and releases its genre and tag counts.
    ///
    /// # Returns
    /// - `Ok(())` - Comic deleted
    /// - `Err(AppError::NotFound)` - No live comic with that id
    pub async fn delete(&self, id: i32, now: DateTime<Utc>) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let repo = ComicRepository::new(&txn);

        let Some(comic) = repo.find_by_id(id).await?.filter(|c| c.deleted_at.is_none()) else {
            return Err(AppError::NotFound("Comic not found".to_string()));
        };

        repo.set_deleted_at(id, Some(now)).await?;

        if let Some(genre) = &comic.genre {
            GenreRepository::new(&txn)
                .decrement_comic_count(genre.id)
                .await?;
        }
        let tag_ids: Vec<i32> = comic.tags.iter().map(|t| t.id).collect();
        TagRepository::new(&txn)
            .decrement_comic_count(&tag_ids)
            .await?;

        txn.commit().await?;

        tracing::info!("Soft-deleted comic {}", id);
        Ok(())
    }

    /// Restores a soft-deleted comic and counts it again. Restoring a live comic is a no-op.
    pub async fn restore(&self, id: i32) -> Result<Comic, AppError> {
        let txn = self.db.begin().await?;
        let repo = ComicRepository::new(&txn);

        let Some(comic) = repo.find_by_id(id).await? else {
            return Err(AppError::NotFound("Comic not found".to_string()));
        };

        if comic.deleted_at.is_none() {
            return Ok(comic);
        }

        repo.set_deleted_at(id, None).await?;

        if let Some(genre) = &comic.genre {
            GenreRepository::new(&txn)
                .increment_comic_count(genre.id)
                .await?;
        }
        let tag_ids: Vec<i32> = comic.tags.iter().map(|t| t.id).collect();
        TagRepository::new(&txn)
            .increment_comic_count(&tag_ids)
            .await?;

        let restored = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comic not found".to_string()))?;

        txn.commit().await?;

        tracing::info!("Restored comic {}", id);
        Ok(restored)
    }
}

/// Rejects genre and tag ids that do not exist.
async fn check_references<C: ConnectionTrait>(
    db: &C,
    genre_id: Option<i32>,
    tag_ids: &[i32],
) -> Result<(), AppError> {
    if let Some(genre_id) = genre_id {
        if GenreRepository::new(db).find_by_id(genre_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "genre {} does not exist",
                genre_id
            )));
        }
    }

    if !tag_ids.is_empty() {
        let found = TagRepository::new(db).count_existing(tag_ids).await?;
        if found != tag_ids.len() as u64 {
            return Err(AppError::BadRequest(
                "one or more tags do not exist".to_string(),
            ));
        }
    }

    Ok(())
}

async fn move_genre_count<C: ConnectionTrait>(
    db: &C,
    from: Option<i32>,
    to: Option<i32>,
) -> Result<(), AppError> {
    let genres = GenreRepository::new(db);

    if let Some(from) = from {
        genres.decrement_comic_count(from).await?;
    }
    if let Some(to) = to {
        genres.increment_comic_count(to).await?;
    }

    Ok(())
}
