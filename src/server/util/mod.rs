//! Pure helpers shared by services and controllers.

pub mod markdown;
pub mod pagination;
pub mod slug;
pub mod tag_cloud;
pub mod trend;
pub mod validate;
