use sea_orm_migration::{prelude::*, schema::*};

use super::m20260107_000009_create_blog_post_table::BlogPost;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPostLike::Table)
                    .if_not_exists()
                    .col(integer(BlogPostLike::BlogPostId))
                    .col(string(BlogPostLike::Liker))
                    .col(timestamp_with_time_zone(BlogPostLike::CreatedAt).default(Expr::current_timestamp()))
                    .primary_key(
                        Index::create()
                            .col(BlogPostLike::BlogPostId)
                            .col(BlogPostLike::Liker),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_like_blog_post_id")
                            .from(BlogPostLike::Table, BlogPostLike::BlogPostId)
                            .to(BlogPost::Table, BlogPost::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPostLike::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum BlogPostLike {
    Table,
    BlogPostId,
    Liker,
    CreatedAt,
}
