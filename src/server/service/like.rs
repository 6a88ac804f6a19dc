//! Likes on comics and blog posts.
//!
//! The like row and the content's `likes` counter change in one transaction, so the
//! counter always equals the number of likers.

use entity::view_event::ContentKind;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{blog_post::BlogPostRepository, comic::ComicRepository, like::LikeRepository},
    error::AppError,
    model::like::{LikeStatus, Liker},
};

pub struct LikeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LikeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Likes live content. A repeated like leaves everything unchanged.
    ///
    /// # Returns
    /// - `Ok(LikeStatus)` - `changed` is false when the liker had already liked
    /// - `Err(AppError::NotFound)` - Content missing or soft-deleted
    pub async fn like(
        &self,
        kind: ContentKind,
        content_id: i32,
        liker: &Liker,
    ) -> Result<LikeStatus, AppError> {
        let txn = self.db.begin().await?;
        require_live(&txn, kind, content_id).await?;

        let repo = LikeRepository::new(&txn);
        let changed = repo.like(kind, content_id, &liker.key()).await?;
        let likes = repo.likes(kind, content_id).await?.unwrap_or(0);

        txn.commit().await?;

        Ok(LikeStatus {
            liked: true,
            changed,
            likes,
        })
    }

    /// Removes a like. Unliking content the liker never liked is a no-op.
    pub async fn unlike(
        &self,
        kind: ContentKind,
        content_id: i32,
        liker: &Liker,
    ) -> Result<LikeStatus, AppError> {
        let txn = self.db.begin().await?;
        require_live(&txn, kind, content_id).await?;

        let repo = LikeRepository::new(&txn);
        let changed = repo.unlike(kind, content_id, &liker.key()).await?;
        let likes = repo.likes(kind, content_id).await?.unwrap_or(0);

        txn.commit().await?;

        Ok(LikeStatus {
            liked: false,
            changed,
            likes,
        })
    }

    pub async fn status(
        &self,
        kind: ContentKind,
        content_id: i32,
        liker: &Liker,
    ) -> Result<LikeStatus, AppError> {
        require_live(self.db, kind, content_id).await?;

        let repo = LikeRepository::new(self.db);
        let liked = repo.has_liked(kind, content_id, &liker.key()).await?;
        let likes = repo.likes(kind, content_id).await?.unwrap_or(0);

        Ok(LikeStatus {
            liked,
            changed: false,
            likes,
        })
    }
}

async fn require_live<C: ConnectionTrait>(
    db: &C,
    kind: ContentKind,
    content_id: i32,
) -> Result<(), AppError> {
    let (exists, label) = match kind {
        ContentKind::Comic => (
            ComicRepository::new(db).exists_live(content_id).await?,
            "Comic",
        ),
        ContentKind::BlogPost => (
            BlogPostRepository::new(db).exists_live(content_id).await?,
            "Blog post",
        ),
    };

    if !exists {
        return Err(AppError::NotFound(format!("{} not found", label)));
    }
    Ok(())
}
