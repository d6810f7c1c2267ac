//! Typed procedure endpoint, `POST /api/rpc/{procedure}`.
//!
//! The body is the procedure input as JSON (an empty body counts as `{}`).
//! Successful calls answer `{"result":{"data":...}}`, failures
//! `{"error":{"message":...,"code":...}}` with the status of the matching
//! REST error.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use common::{
    CategoryListQuery, CreateCategoryRequest, CreateExpenseRequest, ExpenseListQuery,
    GenerateReportRequest, GroupQuery, IdRequest, IncomeRangeRequest, PeriodQuery, SeriesRequest,
    SetPaidRequest, UpdateExpenseRequest, UpsertIncomeRequest,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, instrument};
use validator::Validate;

use crate::auth::AuthContext;
use crate::error::{ApiError, ApiResult};
use crate::schemas::AppState;
use crate::services::{categories, expenses, income, reports, summary};

/// Input of `expenses.update`: the id next to the changed fields.
#[derive(Debug, Deserialize, Validate)]
struct UpdateExpenseInput {
    id: i32,
    #[serde(flatten)]
    #[validate(nested)]
    changes: UpdateExpenseRequest,
}

/// Input of `expenses.updateSeries`.
#[derive(Debug, Deserialize, Validate)]
struct UpdateSeriesInput {
    id: i32,
    #[serde(flatten)]
    #[validate(nested)]
    series: SeriesRequest,
}

#[derive(Serialize)]
struct Acknowledgement {
    success: bool,
}

const ACK: Acknowledgement = Acknowledgement { success: true };

fn input<T: DeserializeOwned + Validate>(body: &Bytes) -> ApiResult<T> {
    let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
        json!({})
    } else {
        serde_json::from_slice(body).map_err(|e| ApiError::validation(format!("Invalid input: {e}")))?
    };
    let parsed: T =
        serde_json::from_value(value).map_err(|e| ApiError::validation(format!("Invalid input: {e}")))?;
    parsed.validate()?;
    Ok(parsed)
}

fn output<T: Serialize>(data: T) -> ApiResult<Value> {
    serde_json::to_value(data)
        .map_err(|e| ApiError::Database(format!("Failed to encode result: {e}")))
}

async fn dispatch(state: &AppState, user_id: i32, procedure: &str, body: &Bytes) -> ApiResult<Value> {
    match procedure {
        "categories.list" => {
            let query: CategoryListQuery = input(body)?;
            output(categories::list(state, user_id, query.unique.unwrap_or(false)).await?)
        }
        "categories.create" => output(categories::create(state, user_id, input(body)?).await?),
        "categories.delete" => {
            let IdRequest { id } = input(body)?;
            categories::delete(state, user_id, id).await?;
            output(ACK)
        }

        "income.get" => output(income::get(state, user_id, input::<PeriodQuery>(body)?).await?),
        "income.upsert" => {
            output(income::upsert(state, user_id, input::<UpsertIncomeRequest>(body)?).await?)
        }
        "income.upsertRange" => {
            output(income::upsert_range(state, user_id, input::<IncomeRangeRequest>(body)?).await?)
        }

        "expenses.list" => {
            output(expenses::list(state, user_id, input::<ExpenseListQuery>(body)?).await?)
        }
        "expenses.byGroup" => {
            let GroupQuery { group_id } = input(body)?;
            output(expenses::by_group(state, user_id, &group_id).await?)
        }
        "expenses.create" => {
            output(expenses::create(state, user_id, input::<CreateExpenseRequest>(body)?).await?)
        }
        "expenses.update" => {
            let UpdateExpenseInput { id, changes } = input(body)?;
            expenses::update(state, user_id, id, changes).await?;
            output(ACK)
        }
        "expenses.delete" => {
            let IdRequest { id } = input(body)?;
            expenses::delete(state, user_id, id).await?;
            output(ACK)
        }
        "expenses.setPaid" => {
            output(expenses::set_paid(state, user_id, input::<SetPaidRequest>(body)?).await?)
        }
        "expenses.createSeries" => {
            output(expenses::create_series(state, user_id, input::<SeriesRequest>(body)?).await?)
        }
        "expenses.updateSeries" => {
            let UpdateSeriesInput { id, series } = input(body)?;
            output(expenses::update_series(state, user_id, id, series).await?)
        }

        "summary.get" => output(summary::monthly(state, user_id, input::<PeriodQuery>(body)?).await?),
        "dashboard.get" => {
            output(summary::dashboard(state, user_id, input::<PeriodQuery>(body)?).await?)
        }

        "reports.list" => output(reports::list(state, user_id).await?),
        "reports.get" => {
            output(reports::get_for_period(state, user_id, input::<PeriodQuery>(body)?).await?)
        }
        "reports.generate" => {
            output(reports::generate(state, user_id, input::<GenerateReportRequest>(body)?).await?)
        }
        "reports.delete" => {
            let IdRequest { id } = input(body)?;
            reports::delete(state, user_id, id).await?;
            output(ACK)
        }

        unknown => Err(ApiError::NotFound(format!("Unknown procedure '{unknown}'"))),
    }
}

/// Call a procedure by name
#[utoipa::path(
    post,
    path = "/api/rpc/{procedure}",
    params(("procedure" = String, Path, description = "Procedure name, e.g. summary.get")),
    responses(
        (status = 200, description = "`{\"result\":{\"data\":...}}`"),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Unknown procedure or missing row"),
        (status = 500, description = "Database or storage failure")
    ),
    tag = "rpc"
)]
#[instrument(skip(state, body), fields(size = body.len()))]
pub async fn rpc_handler(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(procedure): Path<String>,
    body: Bytes,
) -> Response {
    match dispatch(&state, auth.user_id, &procedure, &body).await {
        Ok(data) => {
            debug!("Procedure {} succeeded", procedure);
            (StatusCode::OK, Json(json!({ "result": { "data": data } }))).into_response()
        }
        Err(err) => {
            err.log();
            let body = json!({
                "error": {
                    "message": err.to_string(),
                    "code": err.code(),
                }
            });
            (err.status(), Json(body)).into_response()
        }
    }
}
