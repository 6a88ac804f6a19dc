use sea_orm_migration::{prelude::*, schema::*};

use super::m20260106_000005_create_comic_table::Comic;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ComicLike::Table)
                    .if_not_exists()
                    .col(integer(ComicLike::ComicId))
                    .col(string(ComicLike::Liker))
                    .col(timestamp_with_time_zone(ComicLike::CreatedAt).default(Expr::current_timestamp()))
                    .primary_key(
                        Index::create()
                            .col(ComicLike::ComicId)
                            .col(ComicLike::Liker),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comic_like_comic_id")
                            .from(ComicLike::Table, ComicLike::ComicId)
                            .to(Comic::Table, Comic::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ComicLike::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ComicLike {
    Table,
    ComicId,
    Liker,
    CreatedAt,
}
