use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000002_create_genre_table::Genre;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comic::Table)
                    .if_not_exists()
                    .col(pk_auto(Comic::Id))
                    .col(string(Comic::Title))
                    .col(string_uniq(Comic::Slug))
                    .col(text(Comic::Description))
                    .col(string(Comic::Author))
                    .col(string_null(Comic::CoverImageUrl))
                    .col(integer_null(Comic::GenreId))
                    .col(string_len(Comic::Status, 16).default("draft"))
                    .col(big_integer(Comic::Views).default(0))
                    .col(big_integer(Comic::Likes).default(0))
                    .col(timestamp_with_time_zone_null(Comic::PublishedAt))
                    .col(timestamp_with_time_zone_null(Comic::DeletedAt))
                    .col(timestamp_with_time_zone(Comic::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Comic::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comic_genre_id")
                            .from(Comic::Table, Comic::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comic_created_at")
                    .table(Comic::Table)
                    .col(Comic::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comic::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Comic {
    Table,
    Id,
    Title,
    Slug,
    Description,
    Author,
    CoverImageUrl,
    GenreId,
    Status,
    Views,
    Likes,
    PublishedAt,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
