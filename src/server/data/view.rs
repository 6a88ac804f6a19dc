use chrono::{DateTime, Utc};
use entity::view_event::ContentKind;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

/// Append-only log of qualifying reads, used for view trends.
pub struct ViewEventRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ViewEventRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn record(
        &self,
        kind: ContentKind,
        content_id: i32,
        viewed_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        entity::view_event::ActiveModel {
            content_kind: ActiveValue::Set(kind),
            content_id: ActiveValue::Set(content_id),
            viewed_at: ActiveValue::Set(viewed_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }
}
