//! HTTP request handlers.
//!
//! Handlers authenticate through [`AuthGuard`](crate::server::middleware::auth::AuthGuard),
//! convert request DTOs into validated parameter types, call a service and convert the
//! resulting domain model back into a DTO.

pub mod analytics;
pub mod auth;
pub mod blog;
pub mod category;
pub mod comic;
pub mod extract;
pub mod genre;
pub mod maintenance;
pub mod subscriber;
pub mod tag;
pub mod user;

use axum::http::HeaderMap;
use serde::Deserialize;

use crate::server::{
    error::AppError, middleware::auth::AuthGuard, model::like::Liker, state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeParams {
    pub visitor_id: Option<String>,
}

/// Picks the liker for a like endpoint: the bearer token's user when present,
/// otherwise the `visitorId` query parameter.
async fn resolve_liker(
    state: &AppState,
    headers: &HeaderMap,
    params: LikeParams,
) -> Result<Liker, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, headers)
        .optional()
        .await?;

    Liker::resolve(user.map(|u| u.id), params.visitor_id)
}
