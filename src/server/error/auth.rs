use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request to a protected route without an `Authorization: Bearer` header.
    #[error("Missing bearer token")]
    MissingToken,

    /// Bearer token failed signature, format or expiry checks.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    /// Token is valid but its user no longer exists.
    #[error("User {0} from token not found in database")]
    UserNotInDatabase(i32),

    /// Unknown email or wrong password on login, or wrong current password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Login attempted while `locked_until` lies in the future.
    #[error("Account {0} is locked")]
    AccountLocked(i32),

    /// Authenticated user lacks a required permission.
    ///
    /// # Fields
    /// - User id
    /// - Description of the denied action for the logs
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// Token and credential failures become 401 with a generic message, lockouts and
/// missing permissions become 403. Details stay in the logs.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::MissingToken | Self::InvalidToken(_) | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "authentication required")
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid credentials"),
            Self::AccountLocked(_) => (
                StatusCode::FORBIDDEN,
                "account locked, try again later",
            ),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "insufficient permissions"),
        };

        (status, Json(ErrorDto::new(message))).into_response()
    }
}
