use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{analytics::RecountReportDto, api::ErrorDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::maintenance::MaintenanceService,
        state::AppState,
    },
};

/// Tag for grouping maintenance endpoints in OpenAPI documentation
pub static MAINTENANCE_TAG: &str = "maintenance";

/// Recompute genre, tag and category counters from the source tables.
///
/// The same job runs daily from the scheduler.
///
/// # Returns
/// - `200 OK` - Number of corrected rows per collection
#[utoipa::path(
    post,
    path = "/api/admin/maintenance/recount",
    tag = MAINTENANCE_TAG,
    responses(
        (status = 200, description = "Counters reconciled", body = RecountReportDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn recount_counters(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let report = MaintenanceService::new(&state.db).recount_counters().await?;

    Ok((StatusCode::OK, Json(report.into_dto())))
}
