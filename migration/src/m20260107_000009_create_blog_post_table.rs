use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_user_table::User, m20260105_000004_create_category_table::Category,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPost::Table)
                    .if_not_exists()
                    .col(pk_auto(BlogPost::Id))
                    .col(string(BlogPost::Title))
                    .col(string_uniq(BlogPost::Slug))
                    .col(text(BlogPost::Excerpt))
                    .col(text(BlogPost::Content))
                    .col(integer_null(BlogPost::AuthorId))
                    .col(integer_null(BlogPost::CategoryId))
                    .col(string_null(BlogPost::CoverImageUrl))
                    .col(string_len(BlogPost::Status, 16).default("draft"))
                    .col(timestamp_with_time_zone_null(BlogPost::PublishAt))
                    .col(timestamp_with_time_zone_null(BlogPost::PublishedAt))
                    .col(big_integer(BlogPost::Views).default(0))
                    .col(big_integer(BlogPost::Likes).default(0))
                    .col(timestamp_with_time_zone_null(BlogPost::DeletedAt))
                    .col(timestamp_with_time_zone(BlogPost::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(BlogPost::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_category_id")
                            .from(BlogPost::Table, BlogPost::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_author_id")
                            .from(BlogPost::Table, BlogPost::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_post_status_publish_at")
                    .table(BlogPost::Table)
                    .col(BlogPost::Status)
                    .col(BlogPost::PublishAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPost::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum BlogPost {
    Table,
    Id,
    Title,
    Slug,
    Excerpt,
    Content,
    AuthorId,
    CategoryId,
    CoverImageUrl,
    Status,
    PublishAt,
    PublishedAt,
    Views,
    Likes,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
