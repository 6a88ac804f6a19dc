//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs at the controller boundary. Parameter types are built from
//! request DTOs and carry already-validated values into the service layer.

pub mod analytics;
pub mod blog;
pub mod category;
pub mod comic;
pub mod counter;
pub mod genre;
pub mod like;
pub mod sort;
pub mod subscriber;
pub mod tag;
pub mod user;
