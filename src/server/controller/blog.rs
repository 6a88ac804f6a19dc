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
        blog::{
            BlogPostDto, CreateBlogPostDto, PaginatedBlogPostsDto, PostStatusDto,
            UpdateBlogPostDto,
        },
    },
    server::{
        controller::extract::{ApiJson, ApiQuery},
        controller::{resolve_liker, LikeParams},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            blog::{BlogPostFilter, CreateBlogPostParams, UpdateBlogPostParams},
            sort::ContentSort,
        },
        service::{blog::BlogService, like::LikeService},
        state::AppState,
        util::pagination::PageRequest,
    },
};

/// Tag for grouping blog endpoints in OpenAPI documentation
pub static BLOG_TAG: &str = "blog";

#[derive(Deserialize)]
pub struct BlogListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub sort: Option<String>,
    /// Category slug
    pub category: Option<String>,
    pub status: Option<PostStatusDto>,
    #[serde(default)]
    pub deleted: bool,
}

/// List blog posts.
///
/// Non-admin callers only see published, non-deleted posts. List items carry the
/// excerpt but not the full content.
#[utoipa::path(
    get,
    path = "/api/blogs",
    tag = BLOG_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number, 1-based (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("search" = Option<String>, Query, description = "Title substring"),
        ("sort" = Option<String>, Query, description = "newest, oldest, popular, liked or title"),
        ("category" = Option<String>, Query, description = "Category slug"),
        ("status" = Option<PostStatusDto>, Query, description = "Admin only: post status"),
        ("deleted" = Option<bool>, Query, description = "Admin only: list soft-deleted posts")
    ),
    responses(
        (status = 200, description = "Page of blog posts", body = PaginatedBlogPostsDto),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 401, description = "Invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_blog_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(params): ApiQuery<BlogListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .optional()
        .await?;
    let is_admin = user.is_some_and(|u| u.is_admin());

    let filter = BlogPostFilter {
        public_only: !is_admin,
        category_slug: params.category,
        search: params.search,
        status: params.status.filter(|_| is_admin).map(Into::into),
        deleted: is_admin && params.deleted,
        sort: ContentSort::parse(params.sort.as_deref())?,
    };

    let posts = BlogService::new(&state.db)
        .get_paginated(filter, PageRequest::new(params.page, params.limit))
        .await?;

    Ok((StatusCode::OK, Json(posts.into_dto())))
}

/// Read a published post by slug. Counts as a view.
#[utoipa::path(
    get,
    path = "/api/blogs/slug/{slug}",
    tag = BLOG_TAG,
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Blog post", body = BlogPostDto),
        (status = 404, description = "Post not found or not published", body = ErrorDto)
    ),
)]
pub async fn get_blog_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = BlogService::new(&state.db)
        .get_public_by_slug(&slug, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(post.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/blogs/{id}",
    tag = BLOG_TAG,
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Blog post", body = BlogPostDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_blog_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let post = BlogService::new(&state.db).get_by_id(id).await?;

    Ok((StatusCode::OK, Json(post.into_dto())))
}

/// Create a blog post authored by the calling admin.
///
/// A `scheduled` post needs a `publishAt` in the future and is published by the
/// scheduler once that time passes.
///
/// # Returns
/// - `201 Created` - Post created
/// - `400 Bad Request` - Invalid fields, schedule or category id
#[utoipa::path(
    post,
    path = "/api/blogs",
    tag = BLOG_TAG,
    request_body = CreateBlogPostDto,
    responses(
        (status = 201, description = "Post created", body = BlogPostDto),
        (status = 400, description = "Invalid post data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_blog_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<CreateBlogPostDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = CreateBlogPostParams::from_dto(payload, admin.id, Utc::now())?;
    let post = BlogService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(post.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    tag = BLOG_TAG,
    params(("id" = i32, Path, description = "Post id")),
    request_body = UpdateBlogPostDto,
    responses(
        (status = 200, description = "Post updated", body = BlogPostDto),
        (status = 400, description = "Invalid post data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_blog_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateBlogPostDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = UpdateBlogPostParams::from_dto(payload)?;
    let post = BlogService::new(&state.db)
        .update(id, params, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(post.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    tag = BLOG_TAG,
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Post not found or already deleted", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_blog_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    BlogService::new(&state.db).delete(id, Utc::now()).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/blogs/{id}/restore",
    tag = BLOG_TAG,
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post restored", body = BlogPostDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn restore_blog_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let post = BlogService::new(&state.db).restore(id).await?;

    Ok((StatusCode::OK, Json(post.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/blogs/{id}/like",
    tag = BLOG_TAG,
    params(
        ("id" = i32, Path, description = "Post id"),
        ("visitorId" = Option<String>, Query, description = "Anonymous visitor id, required without a token")
    ),
    responses(
        (status = 200, description = "Like status", body = LikeStatusDto),
        (status = 400, description = "Missing or invalid visitor id", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn get_blog_post_like(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiQuery(params): ApiQuery<LikeParams>,
) -> Result<impl IntoResponse, AppError> {
    let liker = resolve_liker(&state, &headers, params).await?;

    let status = LikeService::new(&state.db)
        .status(ContentKind::BlogPost, id, &liker)
        .await?;

    Ok((StatusCode::OK, Json(status.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/blogs/{id}/like",
    tag = BLOG_TAG,
    params(
        ("id" = i32, Path, description = "Post id"),
        ("visitorId" = Option<String>, Query, description = "Anonymous visitor id, required without a token")
    ),
    responses(
        (status = 200, description = "Post liked", body = LikeStatusDto),
        (status = 400, description = "Missing or invalid visitor id", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn like_blog_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiQuery(params): ApiQuery<LikeParams>,
) -> Result<impl IntoResponse, AppError> {
    let liker = resolve_liker(&state, &headers, params).await?;

    let status = LikeService::new(&state.db)
        .like(ContentKind::BlogPost, id, &liker)
        .await?;

    Ok((StatusCode::OK, Json(status.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}/like",
    tag = BLOG_TAG,
    params(
        ("id" = i32, Path, description = "Post id"),
        ("visitorId" = Option<String>, Query, description = "Anonymous visitor id, required without a token")
    ),
    responses(
        (status = 200, description = "Post unliked", body = LikeStatusDto),
        (status = 400, description = "Missing or invalid visitor id", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
)]
pub async fn unlike_blog_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiQuery(params): ApiQuery<LikeParams>,
) -> Result<impl IntoResponse, AppError> {
    let liker = resolve_liker(&state, &headers, params).await?;

    let status = LikeService::new(&state.db)
        .unlike(ContentKind::BlogPost, id, &liker)
        .await?;

    Ok((StatusCode::OK, Json(status.into_dto())))
}
