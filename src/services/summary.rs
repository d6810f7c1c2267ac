use common::{DashboardPayload, MonthlySummary, PeriodQuery};
use compute::summary::SummaryComputer;
use tracing::instrument;

use super::dto::IntoDto;
use crate::error::ApiResult;
use crate::schemas::AppState;

#[instrument(skip(state))]
pub async fn monthly(state: &AppState, user_id: i32, query: PeriodQuery) -> ApiResult<MonthlySummary> {
    let summary = SummaryComputer::new()
        .monthly_summary(&state.db, user_id, query.year, query.month)
        .await?;
    Ok(summary)
}

#[instrument(skip(state))]
pub async fn dashboard(state: &AppState, user_id: i32, query: PeriodQuery) -> ApiResult<DashboardPayload> {
    let dashboard = SummaryComputer::new()
        .dashboard(&state.db, user_id, query.year, query.month)
        .await?;
    Ok(DashboardPayload {
        summary: dashboard.summary,
        expenses: dashboard.expenses.into_dto(),
        categories: dashboard.categories.into_dto(),
    })
}
