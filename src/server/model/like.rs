//! Liker identity and like results.

use crate::{model::api::LikeStatusDto, server::error::AppError};

const VISITOR_ID_MAX: usize = 64;

/// Who is liking a piece of content.
///
/// Stored in the like tables as `user:{id}` or `visitor:{id}` so both kinds share one
/// key space without colliding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Liker {
    User(i32),
    Visitor(String),
}

impl Liker {
    /// Picks the liker identity for a request.
    ///
    /// An authenticated user always wins over a `visitorId`.
    ///
    /// # Returns
    /// - `Ok(Liker)` - Identity resolved
    /// - `Err(AppError::BadRequest)` - Anonymous request without a usable `visitorId`
    pub fn resolve(user_id: Option<i32>, visitor_id: Option<String>) -> Result<Self, AppError> {
        if let Some(id) = user_id {
            return Ok(Self::User(id));
        }

        let visitor_id = visitor_id
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::BadRequest("visitorId is required when not logged in".to_string())
            })?;

        let valid = visitor_id.len() <= VISITOR_ID_MAX
            && visitor_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(AppError::BadRequest(
                "visitorId must be at most 64 letters, digits, '-' or '_'".to_string(),
            ));
        }

        Ok(Self::Visitor(visitor_id))
    }

    /// Key stored in the like tables.
    pub fn key(&self) -> String {
        match self {
            Self::User(id) => format!("user:{}", id),
            Self::Visitor(id) => format!("visitor:{}", id),
        }
    }
}

/// Outcome of a like operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeStatus {
    pub liked: bool,
    pub changed: bool,
    pub likes: i64,
}

impl LikeStatus {
    pub fn into_dto(self) -> LikeStatusDto {
        LikeStatusDto {
            liked: self.liked,
            changed: self.changed,
            likes: self.likes,
        }
    }
}
