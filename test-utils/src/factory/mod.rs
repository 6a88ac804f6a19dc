//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories insert rows directly and never touch the
//! denormalized counters, so tests that need a specific `comic_count` or `likes` value set it
//! explicitly on the factory.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let genre = factory::genre::create_genre(&db).await?;
//!     let comic = factory::comic::ComicFactory::new(&db)
//!         .genre_id(genre.id)
//!         .views(10)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user accounts
//! - `genre` - Create genres
//! - `tag` - Create tags
//! - `category` - Create blog categories
//! - `comic` - Create comics and their tag links
//! - `comic_page` - Create comic pages
//! - `blog_post` - Create blog posts
//! - `subscriber` - Create newsletter subscribers
//! - `helpers` - Unique id generation shared by every factory

pub mod blog_post;
pub mod category;
pub mod comic;
pub mod comic_page;
pub mod genre;
pub mod helpers;
pub mod subscriber;
pub mod tag;
pub mod user;

pub use blog_post::create_blog_post;
pub use category::create_category;
pub use comic::create_comic;
pub use comic_page::create_comic_page;
pub use genre::create_genre;
pub use subscriber::create_subscriber;
pub use tag::create_tag;
pub use user::create_user;
