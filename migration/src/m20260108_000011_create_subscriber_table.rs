use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscriber::Table)
                    .if_not_exists()
                    .col(pk_auto(Subscriber::Id))
                    .col(string_uniq(Subscriber::Email))
                    .col(string_null(Subscriber::Name))
                    .col(string_len(Subscriber::Status, 16).default("active"))
                    .col(string_uniq(Subscriber::UnsubscribeToken))
                    .col(timestamp_with_time_zone(Subscriber::SubscribedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone_null(Subscriber::UnsubscribedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscriber::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Subscriber {
    Table,
    Id,
    Email,
    Name,
    Status,
    UnsubscribeToken,
    SubscribedAt,
    UnsubscribedAt,
}
