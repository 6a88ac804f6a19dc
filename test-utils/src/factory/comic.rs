//! Comic factory for creating test comics and their tag links.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use entity::comic::ComicStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test comics with customizable fields.
///
/// Comics default to `Published` so they are visible to public reads. Tag links
/// added through `tag()` are inserted after the comic; counters are left alone.
///
/// # Example
///
/// ```rust,ignore
/// let comic = ComicFactory::new(&db)
///     .title("Night Shift")
///     .genre_id(genre.id)
///     .tag(tag.id)
///     .build()
///     .await?;
/// ```
pub struct ComicFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    slug: String,
    genre_id: Option<i32>,
    tag_ids: Vec<i32>,
    status: ComicStatus,
    views: i64,
    likes: i64,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl<'a> ComicFactory<'a> {
    /// Creates a new ComicFactory titled `"Comic {id}"` with slug `"comic-{id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            title: format!("Comic {}", id),
            slug: format!("comic-{}", id),
            genre_id: None,
            tag_ids: Vec::new(),
            status: ComicStatus::Published,
            views: 0,
            likes: 0,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn genre_id(mut self, genre_id: i32) -> Self {
        self.genre_id = Some(genre_id);
        self
    }

    /// Links the comic to a tag.
    pub fn tag(mut self, tag_id: i32) -> Self {
        self.tag_ids.push(tag_id);
        self
    }

    pub fn status(mut self, status: ComicStatus) -> Self {
        self.status = status;
        self
    }

    pub fn views(mut self, views: i64) -> Self {
        self.views = views;
        self
    }

    pub fn likes(mut self, likes: i64) -> Self {
        self.likes = likes;
        self
    }

    /// Marks the comic as soft-deleted.
    pub fn deleted(mut self) -> Self {
        self.deleted_at = Some(Utc::now());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the comic and its tag links.
    ///
    /// # Returns
    /// - `Ok(entity::comic::Model)` - Created comic
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::comic::Model, DbErr> {
        let published_at = (self.status == ComicStatus::Published).then_some(self.created_at);
        let comic = entity::comic::ActiveModel {
            title: ActiveValue::Set(self.title),
            slug: ActiveValue::Set(self.slug),
            description: ActiveValue::Set("A test comic".to_string()),
            author: ActiveValue::Set("Test Author".to_string()),
            cover_image_url: ActiveValue::Set(None),
            genre_id: ActiveValue::Set(self.genre_id),
            status: ActiveValue::Set(self.status),
            views: ActiveValue::Set(self.views),
            likes: ActiveValue::Set(self.likes),
            published_at: ActiveValue::Set(published_at),
            deleted_at: ActiveValue::Set(self.deleted_at),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for tag_id in self.tag_ids {
            entity::comic_tag::ActiveModel {
                comic_id: ActiveValue::Set(comic.id),
                tag_id: ActiveValue::Set(tag_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(comic)
    }
}

/// Creates a published comic with default values.
pub async fn create_comic(db: &DatabaseConnection) -> Result<entity::comic::Model, DbErr> {
    ComicFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::TestBuilder, factory};
    use entity::prelude::*;
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn creates_comic_with_tag_links() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_comic_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let tag = factory::create_tag(db).await?;
        let comic = ComicFactory::new(db).tag(tag.id).build().await?;

        assert_eq!(comic.status, ComicStatus::Published);
        assert!(comic.published_at.is_some());
        assert_eq!(ComicTag::find().count(db).await?, 1);

        Ok(())
    }
}
