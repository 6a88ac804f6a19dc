use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use entity::view_event::ContentKind;
use serde::Deserialize;

use crate::{
    model::{
        api::{ErrorDto, LikeStatusDto},
        comic::{
            ComicDto, ComicPageDto, ComicStatusDto, CreateComicDto, CreateComicPageDto,
            PaginatedComicsDto, UpdateComicDto, UpdateComicPageDto,
        },
    },
    server::{
        controller::extract::{ApiJson, ApiQuery},
        controller::{resolve_liker, LikeParams},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            comic::{
                ComicFilter, CreateComicPageParams, CreateComicParams, UpdateComicPageParams,
                UpdateComicParams,
            },
            sort::ContentSort,
        },
        service::{comic::ComicService, comic_page::ComicPageService, like::LikeService},
        state::AppState,
        util::pagination::PageRequest,
    },
};

/// Tag for grouping comic endpoints in OpenAPI documentation
pub static COMIC_TAG: &str = "comic";

#[derive(Deserialize)]
pub struct ComicListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub sort: Option<String>,
    /// Genre slug
    pub genre: Option<String>,
    /// Tag slug
    pub tag: Option<String>,
    pub status: Option<ComicStatusDto>,
    #[serde(default)]
    pub deleted: bool,
}

/// List comics.
///
/// Anonymous callers and regular users only see published, non-deleted comics and the
/// `status` and `deleted` filters are ignored for them. Admins see every status and can
/// list soft-deleted comics with `deleted=true`.
///
/// # Returns
/// - `200 OK` - Page of comics
/// - `400 Bad Request` - Unknown sort value
/// - `401 Unauthorized` - A token was sent but is invalid
#[utoipa::path(
    get,
    path = "/api/comics",
    tag = COMIC_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number, 1-based (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("search" = Option<String>, Query, description = "Title substring"),
        ("sort" = Option<String>, Query, description = "newest, oldest, popular, liked or title"),
        ("genre" = Option<String>, Query, description = "Genre slug"),
        ("tag" = Option<String>, Query, description = "Tag slug"),
        ("status" = Option<ComicStatusDto>, Query, description = "Admin only: comic status"),
        ("deleted" = Option<bool>, Query, description = "Admin only: list soft-deleted comics")
    ),
    responses(
        (status = 200, description = "Page of comics", body = PaginatedComicsDto),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 401, description = "Invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_comics(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(params): ApiQuery<ComicListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .optional()
        .await?;
    let is_admin = user.is_some_and(|u| u.is_admin());

    let filter = ComicFilter {
        public_only: !is_admin,
        genre_slug: params.genre,
        tag_slug: params.tag,
        search: params.search,
        status: params.status.filter(|_| is_admin).map(Into::into),
        deleted: is_admin && params.deleted,
        sort: ContentSort::parse(params.sort.as_deref())?,
    };

    let comics = ComicService::new(&state.db)
        .get_paginated(filter, PageRequest::new(params.page, params.limit))
        .await?;

    Ok((StatusCode::OK, Json(comics.into_dto())))
}

/// Read a published comic by slug. Counts as a view.
#[utoipa::path(
    get,
    path = "/api/comics/slug/{slug}",
    tag = COMIC_TAG,
    params(("slug" = String, Path, description = "Comic slug")),
    responses(
        (status = 200, description = "Comic", body = ComicDto),
        (status = 404, description = "Comic not found or not published", body = ErrorDto)
    ),
)]
pub async fn get_comic_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let comic = ComicService::new(&state.db)
        .get_public_by_slug(&slug, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(comic.into_dto())))
}

/// Read any comic by id, drafts and soft-deleted ones included. Not counted as a view.
#[utoipa::path(
    get,
    path = "/api/comics/{id}",
    tag = COMIC_TAG,
    params(("id" = i32, Path, description = "Comic id")),
    responses(
        (status = 200, description = "Comic", body = ComicDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Comic not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_comic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let comic = ComicService::new(&state.db).get_by_id(id).await?;

    Ok((StatusCode::OK, Json(comic.into_dto())))
}

/// Create a comic.
///
/// # Access Control
/// - `Admin` - Only admins can create comics
///
/// # Returns
/// - `201 Created` - Comic created, genre and tag counters updated
/// - `400 Bad Request` - Invalid fields or unknown genre/tag ids
#[utoipa::path(
    post,
    path = "/api/comics",
    tag = COMIC_TAG,
    request_body = CreateComicDto,
    responses(
        (status = 201, description = "Comic created", body = ComicDto),
        (status = 400, description = "Invalid comic data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_comic(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<CreateComicDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = CreateComicParams::from_dto(payload)?;
    let comic = ComicService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(comic.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/comics/{id}",
    tag = COMIC_TAG,
    params(("id" = i32, Path, description = "Comic id")),
    request_body = UpdateComicDto,
    responses(
        (status = 200, description = "Comic updated", body = ComicDto),
        (status = 400, description = "Invalid comic data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Comic not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_comic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateComicDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = UpdateComicParams::from_dto(payload)?;
    let comic = ComicService::new(&state.db).update(id, params).await?;

    Ok((StatusCode::OK, Json(comic.into_dto())))
}

/// Soft-delete a comic.
#[utoipa::path(
    delete,
    path = "/api/comics/{id}",
    tag = COMIC_TAG,
    params(("id" = i32, Path, description = "Comic id")),
    responses(
        (status = 204, description = "Comic deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Comic not found or already deleted", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_comic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    ComicService::new(&state.db).delete(id, Utc::now()).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/comics/{id}/restore",
    tag = COMIC_TAG,
    params(("id" = i32, Path, description = "Comic id")),
    responses(
        (status = 200, description = "Comic restored", body = ComicDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Comic not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn restore_comic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let comic = ComicService::new(&state.db).restore(id).await?;

    Ok((StatusCode::OK, Json(comic.into_dto())))
}

/// Whether the caller has liked a comic.
///
/// The caller is the token's user when a bearer token is sent, otherwise the
/// `visitorId` query parameter identifies an anonymous visitor.
#[utoipa::path(
    get,
    path = "/api/comics/{id}/like",
    tag = COMIC_TAG,
    params(
        ("id" = i32, Path, description = "Comic id"),
        ("visitorId" = Option<String>, Query, description = "Anonymous visitor id, required without a token")
    ),
    responses(
        (status = 200, description = "Like status", body = LikeStatusDto),
        (status = 400, description = "Missing or invalid visitor id", body = ErrorDto),
        (status = 404, description = "Comic not found", body = ErrorDto)
    ),
)]
pub async fn get_comic_like(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiQuery(params): ApiQuery<LikeParams>,
) -> Result<impl IntoResponse, AppError> {
    let liker = resolve_liker(&state, &headers, params).await?;

    let status = LikeService::new(&state.db)
        .status(ContentKind::Comic, id, &liker)
        .await?;

    Ok((StatusCode::OK, Json(status.into_dto())))
}

/// Like a comic. Liking twice changes nothing.
#[utoipa::path(
    post,
    path = "/api/comics/{id}/like",
    tag = COMIC_TAG,
    params(
        ("id" = i32, Path, description = "Comic id"),
        ("visitorId" = Option<String>, Query, description = "Anonymous visitor id, required without a token")
    ),
    responses(
        (status = 200, description = "Comic liked", body = LikeStatusDto),
        (status = 400, description = "Missing or invalid visitor id", body = ErrorDto),
        (status = 404, description = "Comic not found", body = ErrorDto)
    ),
)]
pub async fn like_comic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiQuery(params): ApiQuery<LikeParams>,
) -> Result<impl IntoResponse, AppError> {
    let liker = resolve_liker(&state, &headers, params).await?;

    let status = LikeService::new(&state.db)
        .like(ContentKind::Comic, id, &liker)
        .await?;

    Ok((StatusCode::OK, Json(status.into_dto())))
}

/// Remove a like from a comic. Unliking without a like is a no-op.
#[utoipa::path(
    delete,
    path = "/api/comics/{id}/like",
    tag = COMIC_TAG,
    params(
        ("id" = i32, Path, description = "Comic id"),
        ("visitorId" = Option<String>, Query, description = "Anonymous visitor id, required without a token")
    ),
    responses(
        (status = 200, description = "Comic unliked", body = LikeStatusDto),
        (status = 400, description = "Missing or invalid visitor id", body = ErrorDto),
        (status = 404, description = "Comic not found", body = ErrorDto)
    ),
)]
pub async fn unlike_comic(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiQuery(params): ApiQuery<LikeParams>,
) -> Result<impl IntoResponse, AppError> {
    let liker = resolve_liker(&state, &headers, params).await?;

    let status = LikeService::new(&state.db)
        .unlike(ContentKind::Comic, id, &liker)
        .await?;

    Ok((StatusCode::OK, Json(status.into_dto())))
}

/// List the pages of a comic in reading order.
///
/// Pages of unpublished or deleted comics are only listed for admins.
#[utoipa::path(
    get,
    path = "/api/comics/{id}/pages",
    tag = COMIC_TAG,
    params(("id" = i32, Path, description = "Comic id")),
    responses(
        (status = 200, description = "Comic pages", body = Vec<ComicPageDto>),
        (status = 404, description = "Comic not found", body = ErrorDto)
    ),
)]
pub async fn get_comic_pages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .optional()
        .await?;
    let public_only = !user.is_some_and(|u| u.is_admin());

    let pages: Vec<ComicPageDto> = ComicPageService::new(&state.db)
        .list(id, public_only)
        .await?
        .into_iter()
        .map(|p| p.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(pages)))
}

/// Add a page to a comic.
///
/// Without a `pageNumber` the page is appended after the current last page.
#[utoipa::path(
    post,
    path = "/api/comics/{id}/pages",
    tag = COMIC_TAG,
    params(("id" = i32, Path, description = "Comic id")),
    request_body = CreateComicPageDto,
    responses(
        (status = 201, description = "Page created", body = ComicPageDto),
        (status = 400, description = "Invalid page data or page number taken", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Comic not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_comic_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<CreateComicPageDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = CreateComicPageParams::from_dto(payload)?;
    let page = ComicPageService::new(&state.db).create(id, params).await?;

    Ok((StatusCode::CREATED, Json(page.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/comics/{id}/pages/{page_id}",
    tag = COMIC_TAG,
    params(
        ("id" = i32, Path, description = "Comic id"),
        ("page_id" = i32, Path, description = "Page id")
    ),
    request_body = UpdateComicPageDto,
    responses(
        (status = 200, description = "Page updated", body = ComicPageDto),
        (status = 400, description = "Invalid page data or page number taken", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Comic or page not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_comic_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, page_id)): Path<(i32, i32)>,
    ApiJson(payload): ApiJson<UpdateComicPageDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = UpdateComicPageParams::from_dto(payload)?;
    let page = ComicPageService::new(&state.db)
        .update(id, page_id, params)
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/comics/{id}/pages/{page_id}",
    tag = COMIC_TAG,
    params(
        ("id" = i32, Path, description = "Comic id"),
        ("page_id" = i32, Path, description = "Page id")
    ),
    responses(
        (status = 204, description = "Page deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Page not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_comic_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, page_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    ComicPageService::new(&state.db).delete(id, page_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
