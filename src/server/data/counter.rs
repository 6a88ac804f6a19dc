//! Denormalized counter updates and reconciliation.
//!
//! Counter columns (`views`, `likes`, `comic_count`, `post_count`) are only ever changed
//! through single `UPDATE ... SET col = col + n` statements so concurrent requests never
//! overwrite each other. Decrements are guarded so a counter cannot drop below zero.

use sea_orm::{
    sea_query::IntoColumnRef, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect, RelationTrait,
};

use crate::server::model::counter::RecountReport;

fn offset(col: impl IntoColumnRef, delta: i64) -> sea_orm::sea_query::Expr {
    use sea_orm::sea_query::{Expr, ExprTrait};
    Expr::col(col).add(delta)
}

/// Adds one to `counter` on every row of `E` whose id is in `ids`.
///
/// # Returns
/// - `Ok(u64)` - Number of rows updated
/// - `Err(DbErr)` - Database error during update
pub async fn increment<E, C>(
    db: &C,
    counter: E::Column,
    id_col: E::Column,
    ids: &[i32],
) -> Result<u64, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(0);
    }

    let result = E::update_many()
        .col_expr(counter, offset(counter, 1))
        .filter(id_col.is_in(ids.iter().copied()))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Subtracts one from `counter` on every row of `E` whose id is in `ids` and whose
/// counter is still positive.
///
/// # Returns
/// - `Ok(u64)` - Number of rows updated
/// - `Err(DbErr)` - Database error during update
pub async fn decrement<E, C>(
    db: &C,
    counter: E::Column,
    id_col: E::Column,
    ids: &[i32],
) -> Result<u64, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(0);
    }

    let result = E::update_many()
        .col_expr(counter, offset(counter, -1))
        .filter(id_col.is_in(ids.iter().copied()))
        .filter(counter.gt(0))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Recomputes genre, tag and category counters from the content tables.
pub struct CounterRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CounterRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Recounts every denormalized collection counter and writes the ones that drifted.
    ///
    /// A genre or tag counts its non-deleted comics, a category its non-deleted posts.
    ///
    /// # Returns
    /// - `Ok(RecountReport)` - Number of corrected rows per collection
    /// - `Err(DbErr)` - Database error during counting or update
    pub async fn recount(&self) -> Result<RecountReport, DbErr> {
        Ok(RecountReport {
            genres: self.recount_genres().await?,
            tags: self.recount_tags().await?,
            categories: self.recount_categories().await?,
        })
    }

    async fn recount_genres(&self) -> Result<u64, DbErr> {
        let genres = entity::prelude::Genre::find().all(self.db).await?;

        let mut corrected = 0;
        for genre in genres {
            let actual = entity::prelude::Comic::find()
                .filter(entity::comic::Column::GenreId.eq(genre.id))
                .filter(entity::comic::Column::DeletedAt.is_null())
                .count(self.db)
                .await? as i64;

            if actual != genre.comic_count {
                tracing::debug!(
                    "Correcting genre {} comic_count {} -> {}",
                    genre.id,
                    genre.comic_count,
                    actual
                );
                entity::prelude::Genre::update_many()
                    .set(entity::genre::ActiveModel {
                        comic_count: sea_orm::ActiveValue::Set(actual),
                        ..Default::default()
                    })
                    .filter(entity::genre::Column::Id.eq(genre.id))
                    .exec(self.db)
                    .await?;
                corrected += 1;
            }
        }

        Ok(corrected)
    }

    async fn recount_tags(&self) -> Result<u64, DbErr> {
        let tags = entity::prelude::Tag::find().all(self.db).await?;

        let mut corrected = 0;
        for tag in tags {
            let actual = entity::prelude::ComicTag::find()
                .join(
                    sea_orm::JoinType::InnerJoin,
                    entity::comic_tag::Relation::Comic.def(),
                )
                .filter(entity::comic_tag::Column::TagId.eq(tag.id))
                .filter(entity::comic::Column::DeletedAt.is_null())
                .count(self.db)
                .await? as i64;

            if actual != tag.comic_count {
                tracing::debug!(
                    "Correcting tag {} comic_count {} -> {}",
                    tag.id,
                    tag.comic_count,
                    actual
                );
                entity::prelude::Tag::update_many()
                    .set(entity::tag::ActiveModel {
                        comic_count: sea_orm::ActiveValue::Set(actual),
                        ..Default::default()
                    })
                    .filter(entity::tag::Column::Id.eq(tag.id))
                    .exec(self.db)
                    .await?;
                corrected += 1;
            }
        }

        Ok(corrected)
    }

    async fn recount_categories(&self) -> Result<u64, DbErr> {
        let categories = entity::prelude::Category::find().all(self.db).await?;

        let mut corrected = 0;
        for category in categories {
            let actual = entity::prelude::BlogPost::find()
                .filter(entity::blog_post::Column::CategoryId.eq(category.id))
                .filter(entity::blog_post::Column::DeletedAt.is_null())
                .count(self.db)
                .await? as i64;

            if actual != category.post_count {
                tracing::debug!(
                    "Correcting category {} post_count {} -> {}",
                    category.id,
                    category.post_count,
                    actual
                );
                entity::prelude::Category::update_many()
                    .set(entity::category::ActiveModel {
                        post_count: sea_orm::ActiveValue::Set(actual),
                        ..Default::default()
                    })
                    .filter(entity::category::Column::Id.eq(category.id))
                    .exec(self.db)
                    .await?;
                corrected += 1;
            }
        }

        Ok(corrected)
    }
}
