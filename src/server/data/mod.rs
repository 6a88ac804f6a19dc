//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to keep the data layer separate from business logic. Every repository is
//! generic over `ConnectionTrait`, so the same code runs against the pool or inside a
//! transaction opened by a service.

pub mod analytics;
pub mod blog_post;
pub mod category;
pub mod comic;
pub mod comic_page;
pub mod counter;
pub mod genre;
pub mod like;
pub mod slug;
pub mod subscriber;
pub mod tag;
pub mod user;
pub mod view;

#[cfg(test)]
mod test;
