//! Tag factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test tags.
pub struct TagFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    slug: String,
    comic_count: i64,
}

impl<'a> TagFactory<'a> {
    /// Creates a new TagFactory named `"Tag {id}"` with slug `"tag-{id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Tag {}", id),
            slug: format!("tag-{}", id),
            comic_count: 0,
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

    /// Sets the stored counter without creating any comics.
    pub fn comic_count(mut self, comic_count: i64) -> Self {
        self.comic_count = comic_count;
        self
    }

    pub async fn build(self) -> Result<entity::tag::Model, DbErr> {
        entity::tag::ActiveModel {
            name: ActiveValue::Set(self.name),
            slug: ActiveValue::Set(self.slug),
            comic_count: ActiveValue::Set(self.comic_count),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a tag with default values.
pub async fn create_tag(db: &DatabaseConnection) -> Result<entity::tag::Model, DbErr> {
    TagFactory::new(db).build().await
}
