//! Comic page factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a page for a comic at the given position.
///
/// # Arguments
/// - `db` - Database connection
/// - `comic_id` - Owning comic
/// - `page_number` - 1-based position of the page
pub async fn create_comic_page(
    db: &DatabaseConnection,
    comic_id: i32,
    page_number: i32,
) -> Result<entity::comic_page::Model, DbErr> {
    entity::comic_page::ActiveModel {
        comic_id: ActiveValue::Set(comic_id),
        page_number: ActiveValue::Set(page_number),
        image_url: ActiveValue::Set(format!("https://img.example.com/{}.png", next_id())),
        caption: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
