//! Like tracking for comics and blog posts.
//!
//! Each like is one row keyed by `(content id, liker)`. The `likes` counter on the content
//! row only moves when a like row was actually inserted or deleted, so repeated calls are
//! no-ops. Run these methods inside a transaction to keep the row and the counter in step.

use chrono::Utc;
use entity::view_event::ContentKind;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect,
};

use crate::server::data::counter;

pub struct LikeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LikeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a like and bumps the counter when the liker had not liked yet.
    ///
    /// # Arguments
    /// - `kind` - Comic or blog post
    /// - `content_id` - Id of the liked row
    /// - `liker` - Liker key (`user:{id}` or `visitor:{id}`)
    ///
    /// # Returns
    /// - `Ok(true)` - Like recorded and counter incremented
    /// - `Ok(false)` - Liker had already liked; nothing changed
    /// - `Err(DbErr)` - Database error during insert or update
    pub async fn like(&self, kind: ContentKind, content_id: i32, liker: &str) -> Result<bool, DbErr> {
        let now = Utc::now();

        let inserted = match kind {
            ContentKind::Comic => {
                entity::prelude::ComicLike::insert(entity::comic_like::ActiveModel {
                    comic_id: ActiveValue::Set(content_id),
                    liker: ActiveValue::Set(liker.to_string()),
                    created_at: ActiveValue::Set(now),
                })
                .on_conflict(
                    OnConflict::columns([
                        entity::comic_like::Column::ComicId,
                        entity::comic_like::Column::Liker,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(self.db)
                .await?
            }
            ContentKind::BlogPost => {
                entity::prelude::BlogPostLike::insert(entity::blog_post_like::ActiveModel {
                    blog_post_id: ActiveValue::Set(content_id),
                    liker: ActiveValue::Set(liker.to_string()),
                    created_at: ActiveValue::Set(now),
                })
                .on_conflict(
                    OnConflict::columns([
                        entity::blog_post_like::Column::BlogPostId,
                        entity::blog_post_like::Column::Liker,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(self.db)
                .await?
            }
        };

        if inserted == 0 {
            return Ok(false);
        }

        self.adjust_likes(kind, content_id, true).await?;
        Ok(true)
    }

    /// Removes a like and lowers the counter when the liker had liked.
    ///
    /// # Returns
    /// - `Ok(true)` - Like removed and counter decremented
    /// - `Ok(false)` - Liker had not liked; nothing changed
    /// - `Err(DbErr)` - Database error during delete or update
    pub async fn unlike(&self, kind: ContentKind, content_id: i32, liker: &str) -> Result<bool, DbErr> {
        let deleted = match kind {
            ContentKind::Comic => {
                entity::prelude::ComicLike::delete_many()
                    .filter(entity::comic_like::Column::ComicId.eq(content_id))
                    .filter(entity::comic_like::Column::Liker.eq(liker))
                    .exec(self.db)
                    .await?
                    .rows_affected
            }
            ContentKind::BlogPost => {
                entity::prelude::BlogPostLike::delete_many()
                    .filter(entity::blog_post_like::Column::BlogPostId.eq(content_id))
                    .filter(entity::blog_post_like::Column::Liker.eq(liker))
                    .exec(self.db)
                    .await?
                    .rows_affected
            }
        };

        if deleted == 0 {
            return Ok(false);
        }

        self.adjust_likes(kind, content_id, false).await?;
        Ok(true)
    }

    pub async fn has_liked(&self, kind: ContentKind, content_id: i32, liker: &str) -> Result<bool, DbErr> {
        let count = match kind {
            ContentKind::Comic => {
                entity::prelude::ComicLike::find()
                    .filter(entity::comic_like::Column::ComicId.eq(content_id))
                    .filter(entity::comic_like::Column::Liker.eq(liker))
                    .count(self.db)
                    .await?
            }
            ContentKind::BlogPost => {
                entity::prelude::BlogPostLike::find()
                    .filter(entity::blog_post_like::Column::BlogPostId.eq(content_id))
                    .filter(entity::blog_post_like::Column::Liker.eq(liker))
                    .count(self.db)
                    .await?
            }
        };

        Ok(count > 0)
    }

    /// Current value of the content row's `likes` counter.
    ///
    /// # Returns
    /// - `Ok(Some(i64))` - Counter value
    /// - `Ok(None)` - No such content row
    /// - `Err(DbErr)` - Database error during query
    pub async fn likes(&self, kind: ContentKind, content_id: i32) -> Result<Option<i64>, DbErr> {
        match kind {
            ContentKind::Comic => {
                entity::prelude::Comic::find_by_id(content_id)
                    .select_only()
                    .column(entity::comic::Column::Likes)
                    .into_tuple::<i64>()
                    .one(self.db)
                    .await
            }
            ContentKind::BlogPost => {
                entity::prelude::BlogPost::find_by_id(content_id)
                    .select_only()
                    .column(entity::blog_post::Column::Likes)
                    .into_tuple::<i64>()
                    .one(self.db)
                    .await
            }
        }
    }

    async fn adjust_likes(&self, kind: ContentKind, content_id: i32, up: bool) -> Result<(), DbErr> {
        match (kind, up) {
            (ContentKind::Comic, true) => {
                counter::increment::<entity::prelude::Comic, C>(
                    self.db,
                    entity::comic::Column::Likes,
                    entity::comic::Column::Id,
                    &[content_id],
                )
                .await?
            }
            (ContentKind::Comic, false) => {
                counter::decrement::<entity::prelude::Comic, C>(
                    self.db,
                    entity::comic::Column::Likes,
                    entity::comic::Column::Id,
                    &[content_id],
                )
                .await?
            }
            (ContentKind::BlogPost, true) => {
                counter::increment::<entity::prelude::BlogPost, C>(
                    self.db,
                    entity::blog_post::Column::Likes,
                    entity::blog_post::Column::Id,
                    &[content_id],
                )
                .await?
            }
            (ContentKind::BlogPost, false) => {
                counter::decrement::<entity::prelude::BlogPost, C>(
                    self.db,
                    entity::blog_post::Column::Likes,
                    entity::blog_post::Column::Id,
                    &[content_id],
                )
                .await?
            }
        };

        Ok(())
    }
}
