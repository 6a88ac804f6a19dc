use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::{counter, slug::available_slug},
    model::tag::{CreateTagParams, Tag, UpdateTagParams},
    util::pagination::PageRequest,
};

pub struct TagRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TagRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn available_slug(&self, name: &str, exclude_id: Option<i32>) -> Result<String, DbErr> {
        available_slug::<entity::prelude::Tag, C>(
            self.db,
            entity::tag::Column::Slug,
            entity::tag::Column::Id,
            name,
            exclude_id,
        )
        .await
    }

    pub async fn create(&self, params: CreateTagParams, slug: String) -> Result<Tag, DbErr> {
        let entity = entity::tag::ActiveModel {
            name: ActiveValue::Set(params.name),
            slug: ActiveValue::Set(slug),
            comic_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Tag::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, DbErr> {
        let entity = entity::prelude::Tag::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Tag::from_entity))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, DbErr> {
        let entity = entity::prelude::Tag::find()
            .filter(entity::tag::Column::Slug.eq(slug))
            .one(self.db)
            .await?;

        Ok(entity.map(Tag::from_entity))
    }

    /// Number of the given tag ids that exist.
    pub async fn count_existing(&self, ids: &[i32]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        entity::prelude::Tag::find()
            .filter(entity::tag::Column::Id.is_in(ids.iter().copied()))
            .count(self.db)
            .await
    }

    pub async fn get_all_paginated(&self, page: PageRequest) -> Result<(Vec<Tag>, u64), DbErr> {
        let paginator = entity::prelude::Tag::find()
            .order_by_asc(entity::tag::Column::Name)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let tags = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Tag::from_entity)
            .collect();

        Ok((tags, total))
    }

    /// Tags with at least `min_count` comics, most used first and then by name.
    pub async fn get_with_min_count(&self, min_count: i64) -> Result<Vec<Tag>, DbErr> {
        let entities = entity::prelude::Tag::find()
            .filter(entity::tag::Column::ComicCount.gte(min_count))
            .order_by_desc(entity::tag::Column::ComicCount)
            .order_by_asc(entity::tag::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Tag::from_entity).collect())
    }

    /// Renames a tag and sets its regenerated slug.
    ///
    /// # Returns
    /// - `Ok(Some(Tag))` - Updated tag
    /// - `Ok(None)` - No tag with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        id: i32,
        params: UpdateTagParams,
        slug: String,
    ) -> Result<Option<Tag>, DbErr> {
        let Some(tag) = entity::prelude::Tag::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::tag::ActiveModel = tag.into();
        active_model.name = ActiveValue::Set(params.name);
        active_model.slug = ActiveValue::Set(slug);

        let entity = active_model.update(self.db).await?;

        Ok(Some(Tag::from_entity(entity)))
    }

    /// Deletes a tag together with its comic links.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        entity::prelude::ComicTag::delete_many()
            .filter(entity::comic_tag::Column::TagId.eq(id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::Tag::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn increment_comic_count(&self, ids: &[i32]) -> Result<(), DbErr> {
        counter::increment::<entity::prelude::Tag, C>(
            self.db,
            entity::tag::Column::ComicCount,
            entity::tag::Column::Id,
            ids,
        )
        .await?;
        Ok(())
    }

    pub async fn decrement_comic_count(&self, ids: &[i32]) -> Result<(), DbErr> {
        counter::decrement::<entity::prelude::Tag, C>(
            self.db,
            entity::tag::Column::ComicCount,
            entity::tag::Column::Id,
            ids,
        )
        .await?;
        Ok(())
    }
}
