//! API data transfer objects.
//!
//! Every request and response body of the HTTP API lives here. DTOs serialize with
//! camelCase field names and derive `ToSchema` so the OpenAPI document is generated
//! from the same types the handlers use.

pub mod analytics;
pub mod api;
pub mod auth;
pub mod blog;
pub mod category;
pub mod comic;
pub mod genre;
pub mod subscriber;
pub mod tag;
pub mod user;
