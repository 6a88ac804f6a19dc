//! SeaORM entity definitions for the PanelPress database schema.
//!
//! Each module maps one table. The `prelude` re-exports every entity under its
//! table-derived name for use in queries and test schema generation.

pub mod prelude;

pub mod blog_post;
pub mod blog_post_like;
pub mod category;
pub mod comic;
pub mod comic_like;
pub mod comic_page;
pub mod comic_tag;
pub mod genre;
pub mod subscriber;
pub mod tag;
pub mod user;
pub mod view_event;
