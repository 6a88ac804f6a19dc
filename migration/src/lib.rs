pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_user_table;
mod m20260105_000002_create_genre_table;
mod m20260105_000003_create_tag_table;
mod m20260105_000004_create_category_table;
mod m20260106_000005_create_comic_table;
mod m20260106_000006_create_comic_tag_table;
mod m20260106_000007_create_comic_page_table;
mod m20260106_000008_create_comic_like_table;
mod m20260107_000009_create_blog_post_table;
mod m20260107_000010_create_blog_post_like_table;
mod m20260108_000011_create_subscriber_table;
mod m20260108_000012_create_view_event_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_user_table::Migration),
            Box::new(m20260105_000002_create_genre_table::Migration),
            Box::new(m20260105_000003_create_tag_table::Migration),
            Box::new(m20260105_000004_create_category_table::Migration),
            Box::new(m20260106_000005_create_comic_table::Migration),
            Box::new(m20260106_000006_create_comic_tag_table::Migration),
            Box::new(m20260106_000007_create_comic_page_table::Migration),
            Box::new(m20260106_000008_create_comic_like_table::Migration),
            Box::new(m20260107_000009_create_blog_post_table::Migration),
            Box::new(m20260107_000010_create_blog_post_like_table::Migration),
            Box::new(m20260108_000011_create_subscriber_table::Migration),
            Box::new(m20260108_000012_create_view_event_table::Migration),
        ]
    }
}
