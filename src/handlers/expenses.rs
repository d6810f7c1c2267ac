use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::{
    CreateExpenseRequest, ExpenseDto, ExpenseListQuery, PaidUpdateResult, SeriesRequest,
    SeriesResult, SetPaidRequest, UpdateExpenseRequest,
};
use tracing::{debug, instrument};

use crate::auth::AuthContext;
use crate::error::{ApiResult, ValidJson, ValidQuery};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use crate::services::expenses;

/// Expenses of a month (optionally one category) or of a series
#[utoipa::path(
    get,
    path = "/api/v1/expenses",
    params(ExpenseListQuery),
    responses(
        (status = 200, description = "Expenses retrieved", body = ApiResponse<Vec<ExpenseDto>>),
        (status = 400, description = "Neither a period nor a group was given", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state, query))]
pub async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthContext,
    query: ValidQuery<ExpenseListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<ExpenseDto>>>> {
    let Valid(Query(query)) = query?;
    let data = expenses::list(&state, auth.user_id, query).await?;
    debug!("Listed {} expenses", data.len());
    Ok(Json(ApiResponse::new(data, "Expenses retrieved successfully")))
}

/// Create a single expense
#[utoipa::path(
    post,
    path = "/api/v1/expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense created", body = ApiResponse<ExpenseDto>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state, payload))]
pub async fn create_expense(
    State(state): State<AppState>,
    auth: AuthContext,
    payload: ValidJson<CreateExpenseRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ExpenseDto>>)> {
    let Valid(Json(request)) = payload?;
    let data = expenses::create(&state, auth.user_id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(data, "Expense created successfully")),
    ))
}

/// Change some fields of an expense
#[utoipa::path(
    put,
    path = "/api/v1/expenses/{id}",
    params(("id" = i32, Path, description = "Expense ID")),
    request_body = UpdateExpenseRequest,
    responses(
        (status = 200, description = "Expense updated", body = ApiResponse<ExpenseDto>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state, payload))]
pub async fn update_expense(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i32>,
    payload: ValidJson<UpdateExpenseRequest>,
) -> ApiResult<Json<ApiResponse<ExpenseDto>>> {
    let Valid(Json(request)) = payload?;
    let data = expenses::update(&state, auth.user_id, id, request).await?;
    Ok(Json(ApiResponse::new(data, "Expense updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/expenses/{id}",
    params(("id" = i32, Path, description = "Expense ID")),
    responses(
        (status = 204, description = "Expense deleted"),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state))]
pub async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    expenses::delete(&state, auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mark a list of expenses paid or unpaid
#[utoipa::path(
    put,
    path = "/api/v1/expenses/paid",
    request_body = SetPaidRequest,
    responses(
        (status = 200, description = "Number of rows changed", body = ApiResponse<PaidUpdateResult>),
        (status = 400, description = "Empty or invalid id list", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state, payload))]
pub async fn set_expenses_paid(
    State(state): State<AppState>,
    auth: AuthContext,
    payload: ValidJson<SetPaidRequest>,
) -> ApiResult<Json<ApiResponse<PaidUpdateResult>>> {
    let Valid(Json(request)) = payload?;
    let data = expenses::set_paid(&state, auth.user_id, request).await?;
    Ok(Json(ApiResponse::new(data, "Paid status updated")))
}

/// Materialize a new expense over a month range
#[utoipa::path(
    post,
    path = "/api/v1/expenses/series",
    request_body = SeriesRequest,
    responses(
        (status = 201, description = "Series created", body = ApiResponse<SeriesResult>),
        (status = 400, description = "Invalid range or template", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state, payload))]
pub async fn create_expense_series(
    State(state): State<AppState>,
    auth: AuthContext,
    payload: ValidJson<SeriesRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<SeriesResult>>)> {
    let Valid(Json(request)) = payload?;
    let data = expenses::create_series(&state, auth.user_id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(data, "Expense series created successfully")),
    ))
}

/// Re-materialize the series an expense belongs to over a new range
#[utoipa::path(
    put,
    path = "/api/v1/expenses/{id}/series",
    params(("id" = i32, Path, description = "Any expense of the series")),
    request_body = SeriesRequest,
    responses(
        (status = 200, description = "Series updated", body = ApiResponse<SeriesResult>),
        (status = 400, description = "Invalid range or template", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state, payload))]
pub async fn update_expense_series(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i32>,
    payload: ValidJson<SeriesRequest>,
) -> ApiResult<Json<ApiResponse<SeriesResult>>> {
    let Valid(Json(request)) = payload?;
    let data = expenses::update_series(&state, auth.user_id, id, request).await?;
    Ok(Json(ApiResponse::new(data, "Expense series updated successfully")))
}
