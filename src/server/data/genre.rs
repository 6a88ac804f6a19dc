use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::{counter, slug::available_slug},
    model::genre::{CreateGenreParams, Genre, UpdateGenreParams},
    util::pagination::PageRequest,
};

pub struct GenreRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GenreRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Slug for `name` not used by any other genre.
    pub async fn available_slug(&self, name: &str, exclude_id: Option<i32>) -> Result<String, DbErr> {
        available_slug::<entity::prelude::Genre, C>(
            self.db,
            entity::genre::Column::Slug,
            entity::genre::Column::Id,
            name,
            exclude_id,
        )
        .await
    }

    /// Creates a genre with an empty comic counter.
    pub async fn create(&self, params: CreateGenreParams, slug: String) -> Result<Genre, DbErr> {
        let now = Utc::now();
        let entity = entity::genre::ActiveModel {
            name: ActiveValue::Set(params.name),
            slug: ActiveValue::Set(slug),
            description: ActiveValue::Set(params.description),
            comic_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Genre::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DbErr> {
        let entity = entity::prelude::Genre::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Genre::from_entity))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Genre>, DbErr> {
        let entity = entity::prelude::Genre::find()
            .filter(entity::genre::Column::Slug.eq(slug))
            .one(self.db)
            .await?;

        Ok(entity.map(Genre::from_entity))
    }

    /// Gets genres ordered by name.
    ///
    /// # Returns
    /// - `Ok((genres, total))` - Genres for the requested page and the total genre count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_all_paginated(&self, page: PageRequest) -> Result<(Vec<Genre>, u64), DbErr> {
        let paginator = entity::prelude::Genre::find()
            .order_by_asc(entity::genre::Column::Name)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let genres = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Genre::from_entity)
            .collect();

        Ok((genres, total))
    }

    /// Every genre ordered by name, for analytics.
    pub async fn get_all(&self) -> Result<Vec<entity::genre::Model>, DbErr> {
        entity::prelude::Genre::find()
            .order_by_asc(entity::genre::Column::Name)
            .all(self.db)
            .await
    }

    /// Applies a partial update. `slug` is set when the name changed.
    ///
    /// # Returns
    /// - `Ok(Some(Genre))` - Updated genre
    /// - `Ok(None)` - No genre with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        id: i32,
        params: UpdateGenreParams,
        slug: Option<String>,
    ) -> Result<Option<Genre>, DbErr> {
        let Some(genre) = entity::prelude::Genre::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::genre::ActiveModel = genre.into();
        if let Some(name) = params.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(slug) = slug {
            active_model.slug = ActiveValue::Set(slug);
        }
        if let Some(description) = params.description {
            active_model.description = ActiveValue::Set(description);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;

        Ok(Some(Genre::from_entity(entity)))
    }

    /// Deletes a genre and detaches its comics.
    ///
    /// # Returns
    /// - `Ok(true)` - Genre deleted
    /// - `Ok(false)` - No genre with that id
    /// - `Err(DbErr)` - Database error during update or delete
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        entity::prelude::Comic::update_many()
            .set(entity::comic::ActiveModel {
                genre_id: ActiveValue::Set(None),
                ..Default::default()
            })
            .filter(entity::comic::Column::GenreId.eq(id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::Genre::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn increment_comic_count(&self, id: i32) -> Result<(), DbErr> {
        counter::increment::<entity::prelude::Genre, C>(
            self.db,
            entity::genre::Column::ComicCount,
            entity::genre::Column::Id,
            &[id],
        )
        .await?;
        Ok(())
    }

    pub async fn decrement_comic_count(&self, id: i32) -> Result<(), DbErr> {
        counter::decrement::<entity::prelude::Genre, C>(
            self.db,
            entity::genre::Column::ComicCount,
            entity::genre::Column::Id,
            &[id],
        )
        .await?;
        Ok(())
    }
}
