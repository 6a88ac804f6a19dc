//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Validation that needs the database, lockout rules, schedules
//! - **Orchestration**: Coordinating several repositories behind one operation
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Keeping denormalized counters in step with their rows

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod blog;
pub mod category;
pub mod comic;
pub mod comic_page;
pub mod genre;
pub mod like;
pub mod maintenance;
pub mod subscriber;
pub mod tag;
pub mod user;

#[cfg(test)]
mod test;
