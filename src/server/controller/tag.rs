use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        tag::{CreateTagDto, PaginatedTagsDto, TagCloudEntryDto, TagDto, UpdateTagDto},
    },
    server::{
        controller::extract::{ApiJson, ApiQuery},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::tag::{CreateTagParams, UpdateTagParams},
        service::tag::TagService,
        state::AppState,
        util::pagination::PageRequest,
    },
};

/// Tag for grouping tag endpoints in OpenAPI documentation
pub static TAG_TAG: &str = "tag";

#[derive(Deserialize)]
pub struct PaginationParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudParams {
    pub min_count: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/tags",
    tag = TAG_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number, 1-based (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of tags ordered by name", body = PaginatedTagsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_tags(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let tags = TagService::new(&state.db)
        .get_paginated(PageRequest::new(params.page, params.limit))
        .await?;

    Ok((StatusCode::OK, Json(tags.into_dto())))
}

/// Get the tag cloud.
///
/// Returns tags used by at least `minCount` live comics with a font size scaled
/// between the least and most used of them.
///
/// # Returns
/// - `200 OK` - Tag cloud entries ordered by name
/// - `400 Bad Request` - Negative `minCount`
#[utoipa::path(
    get,
    path = "/api/tags/cloud",
    tag = TAG_TAG,
    params(
        ("minCount" = Option<i64>, Query, description = "Minimum comic count (default: 1)")
    ),
    responses(
        (status = 200, description = "Tag cloud", body = Vec<TagCloudEntryDto>),
        (status = 400, description = "Invalid minimum count", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_tag_cloud(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CloudParams>,
) -> Result<impl IntoResponse, AppError> {
    let cloud = TagService::new(&state.db).cloud(params.min_count).await?;

    let cloud: Vec<TagCloudEntryDto> = cloud.into_iter().map(|e| e.into_dto()).collect();
    Ok((StatusCode::OK, Json(cloud)))
}

#[utoipa::path(
    get,
    path = "/api/tags/slug/{slug}",
    tag = TAG_TAG,
    params(("slug" = String, Path, description = "Tag slug")),
    responses(
        (status = 200, description = "Tag", body = TagDto),
        (status = 404, description = "Tag not found", body = ErrorDto)
    ),
)]
pub async fn get_tag_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tag = TagService::new(&state.db).get_by_slug(&slug).await?;

    Ok((StatusCode::OK, Json(tag.into_dto())))
}

/// Create a tag.
///
/// # Access Control
/// - `Admin` - Only admins can create tags
#[utoipa::path(
    post,
    path = "/api/tags",
    tag = TAG_TAG,
    request_body = CreateTagDto,
    responses(
        (status = 201, description = "Tag created", body = TagDto),
        (status = 400, description = "Invalid tag data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_tag(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<CreateTagDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = CreateTagParams::from_dto(payload)?;
    let tag = TagService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(tag.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/tags/{id}",
    tag = TAG_TAG,
    params(("id" = i32, Path, description = "Tag id")),
    request_body = UpdateTagDto,
    responses(
        (status = 200, description = "Tag updated", body = TagDto),
        (status = 400, description = "Invalid tag data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Tag not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_tag(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateTagDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = UpdateTagParams::from_dto(payload)?;
    let tag = TagService::new(&state.db).update(id, params).await?;

    Ok((StatusCode::OK, Json(tag.into_dto())))
}

/// Delete a tag and detach it from every comic.
#[utoipa::path(
    delete,
    path = "/api/tags/{id}",
    tag = TAG_TAG,
    params(("id" = i32, Path, description = "Tag id")),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Tag not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_tag(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    TagService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
