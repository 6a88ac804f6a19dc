use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ViewEvent::Table)
                    .if_not_exists()
                    .col(pk_auto(ViewEvent::Id))
                    .col(string_len(ViewEvent::ContentKind, 16))
                    .col(integer(ViewEvent::ContentId))
                    .col(timestamp_with_time_zone(ViewEvent::ViewedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_view_event_viewed_at")
                    .table(ViewEvent::Table)
                    .col(ViewEvent::ViewedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ViewEvent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ViewEvent {
    Table,
    Id,
    ContentKind,
    ContentId,
    ViewedAt,
}
