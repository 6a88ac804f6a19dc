//! Genre factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test genres.
pub struct GenreFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    slug: String,
    comic_count: i64,
}

impl<'a> GenreFactory<'a> {
    /// Creates a new GenreFactory named `"Genre {id}"` with slug `"genre-{id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Genre {}", id),
            slug: format!("genre-{}", id),
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

    pub fn comic_count(mut self, comic_count: i64) -> Self {
        self.comic_count = comic_count;
        self
    }

    pub async fn build(self) -> Result<entity::genre::Model, DbErr> {
        let now = Utc::now();
        entity::genre::ActiveModel {
            name: ActiveValue::Set(self.name),
            slug: ActiveValue::Set(self.slug),
            description: ActiveValue::Set(None),
            comic_count: ActiveValue::Set(self.comic_count),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a genre with default values.
pub async fn create_genre(db: &DatabaseConnection) -> Result<entity::genre::Model, DbErr> {
    GenreFactory::new(db).build().await
}
