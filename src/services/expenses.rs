use common::{
    CreateExpenseRequest, ExpenseDto, ExpenseListQuery, PaidUpdateResult, SeriesRequest,
    SeriesResult, SetPaidRequest, UpdateExpenseRequest,
};
use compute::series::{self, ExpenseTemplate};
use model::store::categories::NewCategory;
use model::store::expenses::{self, ExpenseChanges, NewExpense};
use tracing::{debug, instrument};

use super::dto::{IntoDto, expense_type_model};
use super::{categories, parse_amount, period};
use crate::error::{ApiError, ApiResult};
use crate::schemas::AppState;

/// Uses `category_id` when given, otherwise creates a category named
/// `category_name`.
async fn resolve_category(
    state: &AppState,
    user_id: i32,
    category_id: Option<i32>,
    category_name: Option<String>,
) -> ApiResult<i32> {
    match (category_id, category_name) {
        (Some(id), _) => Ok(id),
        (None, Some(name)) => {
            let created = categories::create_named(&state.db, user_id, NewCategory::named(name)).await?;
            debug!("Created category {} for a new expense", created.id);
            Ok(created.id)
        }
        (None, None) => Err(ApiError::validation("Category ID or name is required")),
    }
}

/// By group when `group_id` is set, otherwise by period and optional category.
#[instrument(skip(state))]
pub async fn list(state: &AppState, user_id: i32, query: ExpenseListQuery) -> ApiResult<Vec<ExpenseDto>> {
    if let Some(group_id) = query.group_id {
        return by_group(state, user_id, &group_id).await;
    }

    let (Some(year), Some(month)) = (query.year, query.month) else {
        return Err(ApiError::validation("year and month are required unless groupId is given"));
    };
    let rows = match query.category_id {
        Some(category_id) => {
            expenses::list_for_category(&state.db, user_id, year, month, category_id).await?
        }
        None => expenses::list_for_period(&state.db, user_id, year, month).await?,
    };
    Ok(rows.into_dto())
}

#[instrument(skip(state))]
pub async fn by_group(state: &AppState, user_id: i32, group_id: &str) -> ApiResult<Vec<ExpenseDto>> {
    let rows = expenses::list_for_group(&state.db, user_id, group_id).await?;
    Ok(rows.into_dto())
}

#[instrument(skip(state))]
pub async fn create(
    state: &AppState,
    user_id: i32,
    request: CreateExpenseRequest,
) -> ApiResult<ExpenseDto> {
    let target = period(request.year, request.month)?;
    let amount = parse_amount(&request.amount)?;
    let category_id =
        resolve_category(state, user_id, request.category_id, request.category_name).await?;

    let created = expenses::create(
        &state.db,
        user_id,
        NewExpense {
            category_id,
            year: target.year,
            month: target.month_i32(),
            group_id: request.group_id,
            paid: request.paid.unwrap_or(false),
            expense_type: expense_type_model(request.expense_type),
            description: request.description.unwrap_or_default(),
            amount,
        },
    )
    .await?;
    Ok(created.into_dto())
}

#[instrument(skip(state))]
pub async fn update(
    state: &AppState,
    user_id: i32,
    id: i32,
    request: UpdateExpenseRequest,
) -> ApiResult<ExpenseDto> {
    let amount = request.amount.as_deref().map(parse_amount).transpose()?;
    let updated = expenses::update(
        &state.db,
        user_id,
        id,
        ExpenseChanges {
            category_id: request.category_id,
            group_id: request.group_id,
            paid: request.paid,
            expense_type: request.expense_type.map(expense_type_model),
            description: request.description,
            amount,
        },
    )
    .await?;
    Ok(updated.into_dto())
}

#[instrument(skip(state))]
pub async fn delete(state: &AppState, user_id: i32, id: i32) -> ApiResult<()> {
    expenses::delete(&state.db, user_id, id).await?;
    Ok(())
}

#[instrument(skip(state))]
pub async fn set_paid(state: &AppState, user_id: i32, request: SetPaidRequest) -> ApiResult<PaidUpdateResult> {
    if request.ids.is_empty() {
        return Err(ApiError::validation("ids must not be empty"));
    }
    let updated = expenses::set_paid(&state.db, user_id, &request.ids, request.paid).await?;
    Ok(PaidUpdateResult { updated })
}

struct SeriesInput {
    template: ExpenseTemplate,
    start: compute::YearMonth,
    end: compute::YearMonth,
}

async fn series_input(state: &AppState, user_id: i32, request: SeriesRequest) -> ApiResult<SeriesInput> {
    // Range and amount are checked before a category may be created
    let start = period(request.start_year, request.start_month)?;
    let end = period(request.end_year, request.end_month)?;
    compute::month_range(start, end)?;
    let amount = parse_amount(&request.amount)?;

    let category_id =
        resolve_category(state, user_id, request.category_id, request.category_name).await?;
    Ok(SeriesInput {
        template: ExpenseTemplate {
            category_id,
            expense_type: expense_type_model(request.expense_type),
            description: request.description.unwrap_or_default(),
            amount,
        },
        start,
        end,
    })
}

#[instrument(skip(state))]
pub async fn create_series(state: &AppState, user_id: i32, request: SeriesRequest) -> ApiResult<SeriesResult> {
    let input = series_input(state, user_id, request).await?;
    Ok(series::create_series(&state.db, user_id, input.template, input.start, input.end).await?)
}

#[instrument(skip(state))]
pub async fn update_series(
    state: &AppState,
    user_id: i32,
    id: i32,
    request: SeriesRequest,
) -> ApiResult<SeriesResult> {
    let input = series_input(state, user_id, request).await?;
    Ok(series::edit_series(&state.db, user_id, id, input.template, input.start, input.end).await?)
}
