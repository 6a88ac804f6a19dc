//! Blog category factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test blog categories.
pub struct CategoryFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    slug: String,
    post_count: i64,
}

impl<'a> CategoryFactory<'a> {
    /// Creates a new CategoryFactory named `"Category {id}"` with slug `"category-{id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Category {}", id),
            slug: format!("category-{}", id),
            post_count: 0,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn post_count(mut self, post_count: i64) -> Self {
        self.post_count = post_count;
        self
    }

    pub async fn build(self) -> Result<entity::category::Model, DbErr> {
        let now = Utc::now();
        entity::category::ActiveModel {
            name: ActiveValue::Set(self.name),
            slug: ActiveValue::Set(self.slug),
            description: ActiveValue::Set(None),
            post_count: ActiveValue::Set(self.post_count),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a category with default values.
pub async fn create_category(db: &DatabaseConnection) -> Result<entity::category::Model, DbErr> {
    CategoryFactory::new(db).build().await
}
