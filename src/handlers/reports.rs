use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::{GenerateReportRequest, PeriodQuery, ReportDto};
use tracing::instrument;

use crate::auth::AuthContext;
use crate::error::{ApiResult, ValidJson, ValidQuery};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use crate::services::reports;

#[utoipa::path(
    get,
    path = "/api/v1/reports",
    responses(
        (status = 200, description = "Reports, most recent period first", body = ApiResponse<Vec<ReportDto>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "reports"
)]
#[instrument(skip(state))]
pub async fn list_reports(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Json<ApiResponse<Vec<ReportDto>>>> {
    let data = reports::list(&state, auth.user_id).await?;
    Ok(Json(ApiResponse::new(data, "Reports retrieved successfully")))
}

/// Latest report of a month; `data` is null when none exists
#[utoipa::path(
    get,
    path = "/api/v1/reports/period",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Report retrieved", body = ApiResponse<Option<ReportDto>>),
        (status = 400, description = "Invalid period", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "reports"
)]
#[instrument(skip(state, query))]
pub async fn get_report_for_period(
    State(state): State<AppState>,
    auth: AuthContext,
    query: ValidQuery<PeriodQuery>,
) -> ApiResult<Json<ApiResponse<Option<ReportDto>>>> {
    let Valid(Query(query)) = query?;
    let data = reports::get_for_period(&state, auth.user_id, query).await?;
    Ok(Json(ApiResponse::new(data, "Report retrieved successfully")))
}

/// Store a rendered PDF for a month
#[utoipa::path(
    post,
    path = "/api/v1/reports",
    request_body = GenerateReportRequest,
    responses(
        (status = 201, description = "Report stored", body = ApiResponse<ReportDto>),
        (status = 400, description = "Invalid period or content", body = ErrorResponse),
        (status = 500, description = "Database or storage failure", body = ErrorResponse)
    ),
    tag = "reports"
)]
#[instrument(skip(state, payload))]
pub async fn generate_report(
    State(state): State<AppState>,
    auth: AuthContext,
    payload: ValidJson<GenerateReportRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ReportDto>>)> {
    let Valid(Json(request)) = payload?;
    let data = reports::generate(&state, auth.user_id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(data, "Report stored successfully")),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reports/{id}",
    params(("id" = i32, Path, description = "Report ID")),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 404, description = "Report not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "reports"
)]
#[instrument(skip(state))]
pub async fn delete_report(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    reports::delete(&state, auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
