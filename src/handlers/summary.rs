use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::{MonthlySummary, PeriodQuery};
use tracing::instrument;

use crate::auth::AuthContext;
use crate::error::{ApiResult, ValidQuery};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use crate::services::summary;

/// Totals, balance and per-category breakdown of a month
#[utoipa::path(
    get,
    path = "/api/v1/summary",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Monthly summary", body = ApiResponse<MonthlySummary>),
        (status = 400, description = "Invalid period", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "summary"
)]
#[instrument(skip(state, query))]
pub async fn get_summary(
    State(state): State<AppState>,
    auth: AuthContext,
    query: ValidQuery<PeriodQuery>,
) -> ApiResult<Json<ApiResponse<MonthlySummary>>> {
    let Valid(Query(query)) = query?;
    let data = summary::monthly(&state, auth.user_id, query).await?;
    Ok(Json(ApiResponse::new(data, "Summary computed successfully")))
}
