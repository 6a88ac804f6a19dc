use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::{counter, slug::available_slug},
    model::category::{Category, CreateCategoryParams, UpdateCategoryParams},
    util::pagination::PageRequest,
};

pub struct CategoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CategoryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn available_slug(&self, name: &str, exclude_id: Option<i32>) -> Result<String, DbErr> {
        available_slug::<entity::prelude::Category, C>(
            self.db,
            entity::category::Column::Slug,
            entity::category::Column::Id,
            name,
            exclude_id,
        )
        .await
    }

    /// Creates a category with an empty post counter.
    pub async fn create(
        &self,
        params: CreateCategoryParams,
        slug: String,
    ) -> Result<Category, DbErr> {
        let now = Utc::now();
        let entity = entity::category::ActiveModel {
            name: ActiveValue::Set(params.name),
            slug: ActiveValue::Set(slug),
            description: ActiveValue::Set(params.description),
            post_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Category::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Category>, DbErr> {
        let entity = entity::prelude::Category::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Category::from_entity))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, DbErr> {
        let entity = entity::prelude::Category::find()
            .filter(entity::category::Column::Slug.eq(slug))
            .one(self.db)
            .await?;

        Ok(entity.map(Category::from_entity))
    }

    /// Gets categories ordered by name.
    pub async fn get_all_paginated(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<Category>, u64), DbErr> {
        let paginator = entity::prelude::Category::find()
            .order_by_asc(entity::category::Column::Name)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let categories = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Category::from_entity)
            .collect();

        Ok((categories, total))
    }

    /// Applies a partial update. `slug` is set when the name changed.
    ///
    /// # Returns
    /// - `Ok(Some(Category))` - Updated category
    /// - `Ok(None)` - No category with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        id: i32,
        params: UpdateCategoryParams,
        slug: Option<String>,
    ) -> Result<Option<Category>, DbErr> {
        let Some(category) = entity::prelude::Category::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::category::ActiveModel = category.into();
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

        Ok(Some(Category::from_entity(entity)))
    }

    /// Deletes a category and detaches its posts.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        entity::prelude::BlogPost::update_many()
            .set(entity::blog_post::ActiveModel {
                category_id: ActiveValue::Set(None),
                ..Default::default()
            })
            .filter(entity::blog_post::Column::CategoryId.eq(id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::Category::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn increment_post_count(&self, id: i32) -> Result<(), DbErr> {
        counter::increment::<entity::prelude::Category, C>(
            self.db,
            entity::category::Column::PostCount,
            entity::category::Column::Id,
            &[id],
        )
        .await?;
        Ok(())
    }

    pub async fn decrement_post_count(&self, id: i32) -> Result<(), DbErr> {
        counter::decrement::<entity::prelude::Category, C>(
            self.db,
            entity::category::Column::PostCount,
            entity::category::Column::Id,
            &[id],
        )
        .await?;
        Ok(())
    }
}
