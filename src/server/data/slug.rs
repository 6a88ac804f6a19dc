//! Slug reservation shared by every sluggable collection.

use std::collections::HashSet;

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};

use crate::server::util::slug::{slugify, unique_slug};

/// Returns a slug for `source` that no other row of `E` uses.
///
/// Soft-deleted rows still reserve their slug. When updating, pass the row's own id as
/// `exclude_id` so it does not collide with itself.
///
/// # Arguments
/// - `db` - Connection or transaction to probe
/// - `slug_col` - Slug column of `E`
/// - `id_col` - Primary key column of `E`
/// - `source` - Text to derive the slug from (title or name)
/// - `exclude_id` - Row ignored by the collision probe
///
/// # Returns
/// - `Ok(String)` - Free slug, suffixed with `-1`, `-2`, ... when the base is taken
/// - `Err(DbErr)` - Database error during the probe
pub async fn available_slug<E, C>(
    db: &C,
    slug_col: E::Column,
    id_col: E::Column,
    source: &str,
    exclude_id: Option<i32>,
) -> Result<String, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let base = slugify(source);

    let mut query = E::find()
        .select_only()
        .column(slug_col)
        .filter(slug_col.starts_with(base.as_str()));
    if let Some(id) = exclude_id {
        query = query.filter(id_col.ne(id));
    }

    let taken: HashSet<String> = query.into_tuple::<String>().all(db).await?.into_iter().collect();

    Ok(unique_slug(&base, &taken))
}
