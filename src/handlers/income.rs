use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::{IncomeDto, IncomeRangeRequest, PeriodQuery, UpsertIncomeRequest};
use tracing::instrument;

use crate::auth::AuthContext;
use crate::error::{ApiResult, ValidJson, ValidQuery};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use crate::services::income;

/// Income of a month; `data` is null when none was recorded
#[utoipa::path(
    get,
    path = "/api/v1/income",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Income retrieved", body = ApiResponse<Option<IncomeDto>>),
        (status = 400, description = "Invalid period", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "income"
)]
#[instrument(skip(state, query))]
pub async fn get_income(
    State(state): State<AppState>,
    auth: AuthContext,
    query: ValidQuery<PeriodQuery>,
) -> ApiResult<Json<ApiResponse<Option<IncomeDto>>>> {
    let Valid(Query(query)) = query?;
    let data = income::get(&state, auth.user_id, query).await?;
    let message = if data.is_some() {
        "Income retrieved successfully"
    } else {
        "No income recorded for this period"
    };
    Ok(Json(ApiResponse::new(data, message)))
}

/// Set the income of a month, replacing any previous value
#[utoipa::path(
    put,
    path = "/api/v1/income",
    request_body = UpsertIncomeRequest,
    responses(
        (status = 200, description = "Income saved", body = ApiResponse<IncomeDto>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "income"
)]
#[instrument(skip(state, payload))]
pub async fn upsert_income(
    State(state): State<AppState>,
    auth: AuthContext,
    payload: ValidJson<UpsertIncomeRequest>,
) -> ApiResult<Json<ApiResponse<IncomeDto>>> {
    let Valid(Json(request)) = payload?;
    let data = income::upsert(&state, auth.user_id, request).await?;
    Ok(Json(ApiResponse::new(data, "Income saved successfully")))
}

/// Set the same income for every month of a range
#[utoipa::path(
    put,
    path = "/api/v1/income/range",
    request_body = IncomeRangeRequest,
    responses(
        (status = 200, description = "Income saved for every month", body = ApiResponse<Vec<IncomeDto>>),
        (status = 400, description = "Invalid range or amount", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "income"
)]
#[instrument(skip(state, payload))]
pub async fn upsert_income_range(
    State(state): State<AppState>,
    auth: AuthContext,
    payload: ValidJson<IncomeRangeRequest>,
) -> ApiResult<Json<ApiResponse<Vec<IncomeDto>>>> {
    let Valid(Json(request)) = payload?;
    let data = income::upsert_range(&state, auth.user_id, request).await?;
    let message = format!("Income saved for {} months", data.len());
    Ok(Json(ApiResponse::new(data, message)))
}
