use sea_orm_migration::{prelude::*, schema::*};

use super::{m20260105_000003_create_tag_table::Tag, m20260106_000005_create_comic_table::Comic};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ComicTag::Table)
                    .if_not_exists()
                    .col(integer(ComicTag::ComicId))
                    .col(integer(ComicTag::TagId))
                    .primary_key(
                        Index::create()
                            .col(ComicTag::ComicId)
                            .col(ComicTag::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comic_tag_comic_id")
                            .from(ComicTag::Table, ComicTag::ComicId)
                            .to(Comic::Table, Comic::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comic_tag_tag_id")
                            .from(ComicTag::Table, ComicTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ComicTag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ComicTag {
    Table,
    ComicId,
    TagId,
}
