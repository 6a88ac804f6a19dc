use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::{
    model::{
        api::ErrorDto,
        auth::{AuthResponseDto, ChangePasswordDto, LoginDto, RegisterDto},
        user::UserDto,
    },
    server::{
        controller::extract::ApiJson,
        error::AppError,
        middleware::auth::AuthGuard,
        model::user::{ChangePasswordParams, LoginParams, RegisterParams},
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a new account.
///
/// Creates a regular user, or an admin when `adminCode` matches the bootstrap code
/// logged at startup, and returns a bearer token for it.
///
/// # Returns
/// - `201 Created` - Account created, token issued
/// - `400 Bad Request` - Invalid fields or username/email already taken
/// - `500 Internal Server Error` - Hashing or database error
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = AuthResponseDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = RegisterParams::from_dto(payload)?;

    let session = AuthService::new(&state.db, &state.tokens, state.bcrypt_cost)
        .register(params, &state.admin_codes)
        .await?;

    Ok((StatusCode::CREATED, Json(session.into_dto())))
}

/// Log in with email and password.
///
/// Unknown emails and wrong passwords get the same 401 response. Five consecutive
/// failures lock the account for fifteen minutes.
///
/// # Returns
/// - `200 OK` - Credentials accepted, token issued
/// - `401 Unauthorized` - Invalid credentials
/// - `403 Forbidden` - Account locked
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = AuthResponseDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 403, description = "Account locked", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let session = AuthService::new(&state.db, &state.tokens, state.bcrypt_cost)
        .login(LoginParams::from_dto(payload), Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(session.into_dto())))
}

/// Get the authenticated user.
///
/// # Returns
/// - `200 OK` - Current user
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Change the authenticated user's password.
///
/// # Returns
/// - `204 No Content` - Password changed
/// - `400 Bad Request` - New password too short
/// - `401 Unauthorized` - Missing token or wrong current password
#[utoipa::path(
    put,
    path = "/api/auth/password",
    tag = AUTH_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Invalid new password", body = ErrorDto),
        (status = 401, description = "Not authenticated or wrong current password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let params = ChangePasswordParams::from_dto(payload)?;

    AuthService::new(&state.db, &state.tokens, state.bcrypt_cost)
        .change_password(user.id, params)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
