use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::{DashboardPayload, PeriodQuery};
use tracing::instrument;

use crate::auth::AuthContext;
use crate::error::{ApiResult, ValidQuery};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use crate::services::summary;

/// Summary, expenses and categories of a month in one response
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Dashboard data", body = ApiResponse<DashboardPayload>),
        (status = 400, description = "Invalid period", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "summary"
)]
#[instrument(skip(state, query))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthContext,
    query: ValidQuery<PeriodQuery>,
) -> ApiResult<Json<ApiResponse<DashboardPayload>>> {
    let Valid(Query(query)) = query?;
    let data = summary::dashboard(&state, auth.user_id, query).await?;
    Ok(Json(ApiResponse::new(data, "Dashboard retrieved successfully")))
}
