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
                    .table(ComicPage::Table)
                    .if_not_exists()
                    .col(pk_auto(ComicPage::Id))
                    .col(integer(ComicPage::ComicId))
                    .col(integer(ComicPage::PageNumber))
                    .col(string(ComicPage::ImageUrl))
                    .col(string_null(ComicPage::Caption))
                    .col(timestamp_with_time_zone(ComicPage::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comic_page_comic_id")
                            .from(ComicPage::Table, ComicPage::ComicId)
                            .to(Comic::Table, Comic::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comic_page_number")
                    .table(ComicPage::Table)
                    .col(ComicPage::ComicId)
                    .col(ComicPage::PageNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ComicPage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ComicPage {
    Table,
    Id,
    ComicId,
    PageNumber,
    ImageUrl,
    Caption,
    CreatedAt,
}
