use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    model::{
        analytics::{ActivityDto, GenreShareDto, OverviewDto, TopContentDto},
        api::ErrorDto,
    },
    server::{
        controller::extract::ApiQuery,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::analytics::AnalyticsService,
        state::AppState,
    },
};

/// Tag for grouping analytics endpoints in OpenAPI documentation
pub static ANALYTICS_TAG: &str = "analytics";

#[derive(Deserialize)]
pub struct WindowParams {
    pub days: Option<i64>,
}

#[derive(Deserialize)]
pub struct TopContentParams {
    pub limit: Option<u64>,
}

/// Site totals with the current and previous window counts and their trend.
///
/// The current window is the last `days` days and the previous window the `days`
/// before it.
///
/// # Returns
/// - `200 OK` - Overview metrics
/// - `400 Bad Request` - `days` outside 1..=365
#[utoipa::path(
    get,
    path = "/api/admin/analytics/overview",
    tag = ANALYTICS_TAG,
    params(("days" = Option<i64>, Query, description = "Window length in days (default: 30)")),
    responses(
        (status = 200, description = "Overview metrics", body = OverviewDto),
        (status = 400, description = "Invalid window", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_overview(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(params): ApiQuery<WindowParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let overview = AnalyticsService::new(&state.db)
        .overview(params.days, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(overview.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/admin/analytics/top-content",
    tag = ANALYTICS_TAG,
    params(("limit" = Option<u64>, Query, description = "Entries per ranking (default: 5, max: 50)")),
    responses(
        (status = 200, description = "Most viewed and most liked content", body = TopContentDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_top_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(params): ApiQuery<TopContentParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let top = AnalyticsService::new(&state.db)
        .top_content(params.limit)
        .await?;

    Ok((StatusCode::OK, Json(top.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/admin/analytics/genres",
    tag = ANALYTICS_TAG,
    responses(
        (status = 200, description = "Comic share per genre", body = Vec<GenreShareDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_genre_distribution(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let shares: Vec<GenreShareDto> = AnalyticsService::new(&state.db)
        .genre_distribution()
        .await?
        .into_iter()
        .map(|s| s.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(shares)))
}

/// Daily counts of new content, subscribers and users over the window, zero days included.
#[utoipa::path(
    get,
    path = "/api/admin/analytics/activity",
    tag = ANALYTICS_TAG,
    params(("days" = Option<i64>, Query, description = "Window length in days (default: 30)")),
    responses(
        (status = 200, description = "Activity series", body = ActivityDto),
        (status = 400, description = "Invalid window", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_activity(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(params): ApiQuery<WindowParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let activity = AnalyticsService::new(&state.db)
        .activity(params.days, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(activity.into_dto())))
}
