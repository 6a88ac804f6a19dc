use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        subscriber::{
            PaginatedSubscribersDto, SubscribeDto, SubscriberDto, SubscriberStatusDto,
            SubscriptionDto, UnsubscribeDto,
        },
    },
    server::{
        controller::extract::{ApiJson, ApiQuery},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::subscriber::{SubscribeParams, SubscriberFilter},
        service::subscriber::SubscriberService,
        state::AppState,
        util::pagination::PageRequest,
    },
};

/// Tag for grouping newsletter endpoints in OpenAPI documentation
pub static SUBSCRIBER_TAG: &str = "subscriber";

#[derive(Deserialize)]
pub struct SubscriberListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<SubscriberStatusDto>,
    pub search: Option<String>,
}

/// Subscribe to the newsletter.
///
/// A previously unsubscribed address is reactivated with a new unsubscribe token.
///
/// # Returns
/// - `201 Created` - Subscription active, response carries the unsubscribe token
/// - `400 Bad Request` - Invalid email or already subscribed
#[utoipa::path(
    post,
    path = "/api/subscribers",
    tag = SUBSCRIBER_TAG,
    request_body = SubscribeDto,
    responses(
        (status = 201, description = "Subscribed", body = SubscriptionDto),
        (status = 400, description = "Invalid email or already subscribed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn subscribe(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SubscribeDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = SubscribeParams::from_dto(payload)?;
    let subscriber = SubscriberService::new(&state.db).subscribe(params).await?;

    Ok((StatusCode::CREATED, Json(subscriber.into_subscription_dto())))
}

/// Unsubscribe with the token handed out on subscription. Repeating it is harmless.
#[utoipa::path(
    post,
    path = "/api/subscribers/unsubscribe",
    tag = SUBSCRIBER_TAG,
    request_body = UnsubscribeDto,
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 404, description = "Unknown token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unsubscribe(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UnsubscribeDto>,
) -> Result<impl IntoResponse, AppError> {
    SubscriberService::new(&state.db)
        .unsubscribe(payload.token.trim(), Utc::now())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List subscribers.
///
/// # Access Control
/// - `Admin` - Only admins can list subscribers
#[utoipa::path(
    get,
    path = "/api/subscribers",
    tag = SUBSCRIBER_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number, 1-based (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("status" = Option<SubscriberStatusDto>, Query, description = "active or unsubscribed"),
        ("search" = Option<String>, Query, description = "Email or name substring")
    ),
    responses(
        (status = 200, description = "Page of subscribers", body = PaginatedSubscribersDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_subscribers(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(params): ApiQuery<SubscriberListParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let filter = SubscriberFilter {
        status: params.status.map(Into::into),
        search: params.search,
    };

    let subscribers = SubscriberService::new(&state.db)
        .get_paginated(filter, PageRequest::new(params.page, params.limit))
        .await?;

    Ok((StatusCode::OK, Json(subscribers.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/subscribers/{id}",
    tag = SUBSCRIBER_TAG,
    params(("id" = i32, Path, description = "Subscriber id")),
    responses(
        (status = 200, description = "Subscriber", body = SubscriberDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Subscriber not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_subscriber(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let subscriber = SubscriberService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(subscriber.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/subscribers/{id}",
    tag = SUBSCRIBER_TAG,
    params(("id" = i32, Path, description = "Subscriber id")),
    responses(
        (status = 204, description = "Subscriber deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Subscriber not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_subscriber(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    SubscriberService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
