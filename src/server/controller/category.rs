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
        category::{CategoryDto, CreateCategoryDto, PaginatedCategoriesDto, UpdateCategoryDto},
    },
    server::{
        controller::extract::{ApiJson, ApiQuery},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::category::{CreateCategoryParams, UpdateCategoryParams},
        service::category::CategoryService,
        state::AppState,
        util::pagination::PageRequest,
    },
};

/// Tag for grouping category endpoints in OpenAPI documentation
pub static CATEGORY_TAG: &str = "category";

#[derive(Deserialize)]
pub struct PaginationParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number, 1-based (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of blog categories ordered by name", body = PaginatedCategoriesDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_categories(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let categories = CategoryService::new(&state.db)
        .get_paginated(PageRequest::new(params.page, params.limit))
        .await?;

    Ok((StatusCode::OK, Json(categories.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/categories/slug/{slug}",
    tag = CATEGORY_TAG,
    params(("slug" = String, Path, description = "Category slug")),
    responses(
        (status = 200, description = "Category", body = CategoryDto),
        (status = 404, description = "Category not found", body = ErrorDto)
    ),
)]
pub async fn get_category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let category = CategoryService::new(&state.db).get_by_slug(&slug).await?;

    Ok((StatusCode::OK, Json(category.into_dto())))
}

/// Create a blog category.
///
/// # Access Control
/// - `Admin` - Only admins can create categories
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = CategoryDto),
        (status = 400, description = "Invalid category data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn create_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<CreateCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = CreateCategoryParams::from_dto(payload)?;
    let category = CategoryService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(category.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category id")),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = CategoryDto),
        (status = 400, description = "Invalid category data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let params = UpdateCategoryParams::from_dto(payload)?;
    let category = CategoryService::new(&state.db).update(id, params).await?;

    Ok((StatusCode::OK, Json(category.into_dto())))
}

/// Delete a blog category. Its posts stay, uncategorized.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    CategoryService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
