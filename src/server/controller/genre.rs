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
        genre::{CreateGenreDto, GenreDto, PaginatedGenresDto, UpdateGenreDto},
    },
    server::{
        controller::extract::{ApiJson, ApiQuery},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::genre::{CreateGenreParams, UpdateGenreParams},
        service::genre::GenreService,
        state::AppState,
        util::pagination::PageRequest,
    },
};

/// Tag for grouping genre endpoints in OpenAPI documentation
pub static GENRE_TAG: &str = "genre";

#[derive(Deserialize)]
pub struct PaginationParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// List genres ordered by name.
///
/// # Returns
/// - `200 OK` - Page of genres with their live comic counts
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/genres",
    tag = GENRE_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number, 1-based (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of genres", body = PaginatedGenresDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_genres(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let genres = GenreService::new(&state.db)
        .get_paginated(PageRequest::new(params.page, params.limit))
        .await?;

    Ok((StatusCode::OK, Json(genres.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/genres/slug/{slug}",
    tag = GENRE_TAG,
    params(("slug" = String, Path, description = "Genre slug")),
    responses(
        (status = 200, description = "Genre", body = GenreDto),
        (status = 404, description = "Genre not found", body = ErrorDto)
    ),
)]
pub async fn get_genre_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let genre = GenreService::new(&state.db).get_by_slug(&slug).await?;

    Ok((StatusCode::OK, Json(genre.into_dto())))
}

/// Create a genre. The slug is derived from the name.
///
/// # Access Control
/// - `Admin` - Only admins can create genres
///
/// # Returns
/// - `201 Created` - Genre created
/// - `400 Bad Request` - Invalid name
/// - `401 Unauthorized` / `403 Forbidden` - Not an admin
#[utoipa::path(
    post,
    path = "/api/genres",
    tag = GENRE_TAG,
    request_body = CreateGenreDto,
    responses(
        (status = 201, description = "Genre created", body = GenreDto),
        (status = 400, description = "Invalid genre data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_genre(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<CreateGenreDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = CreateGenreParams::from_dto(payload)?;
    let genre = GenreService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(genre.into_dto())))
}

/// Update a genre. A new name also regenerates the slug.
#[utoipa::path(
    put,
    path = "/api/genres/{id}",
    tag = GENRE_TAG,
    params(("id" = i32, Path, description = "Genre id")),
    request_body = UpdateGenreDto,
    responses(
        (status = 200, description = "Genre updated", body = GenreDto),
        (status = 400, description = "Invalid genre data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Genre not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_genre(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateGenreDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = UpdateGenreParams::from_dto(payload)?;
    let genre = GenreService::new(&state.db).update(id, params).await?;

    Ok((StatusCode::OK, Json(genre.into_dto())))
}

/// Delete a genre. Comics in the genre are kept without a genre.
#[utoipa::path(
    delete,
    path = "/api/genres/{id}",
    tag = GENRE_TAG,
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Genre not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    GenreService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
