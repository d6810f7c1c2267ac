use common::{IncomeDto, IncomeRangeRequest, PeriodQuery, UpsertIncomeRequest};
use model::store::income::{self, IncomeEntry};
use tracing::instrument;

use super::dto::IntoDto;
use super::{parse_amount, period};
use crate::error::ApiResult;
use crate::schemas::AppState;

#[instrument(skip(state))]
pub async fn get(state: &AppState, user_id: i32, query: PeriodQuery) -> ApiResult<Option<IncomeDto>> {
    let row = income::get(&state.db, user_id, query.year, query.month).await?;
    Ok(row.into_dto())
}

#[instrument(skip(state))]
pub async fn upsert(
    state: &AppState,
    user_id: i32,
    request: UpsertIncomeRequest,
) -> ApiResult<IncomeDto> {
    let target = period(request.year, request.month)?;
    let row = income::upsert(
        &state.db,
        user_id,
        IncomeEntry {
            year: target.year,
            month: target.month_i32(),
            amount: parse_amount(&request.amount)?,
            description: request.description,
        },
    )
    .await?;
    Ok(row.into_dto())
}

#[instrument(skip(state))]
pub async fn upsert_range(
    state: &AppState,
    user_id: i32,
    request: IncomeRangeRequest,
) -> ApiResult<Vec<IncomeDto>> {
    let start = period(request.start_year, request.start_month)?;
    let end = period(request.end_year, request.end_month)?;
    let amount = parse_amount(&request.amount)?;

    let rows = compute::income::upsert_income_range(
        &state.db,
        user_id,
        start,
        end,
        amount,
        request.description,
    )
    .await?;
    Ok(rows.into_dto())
}
