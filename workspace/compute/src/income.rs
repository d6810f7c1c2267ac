use model::entities::monthly_income;
use model::store::income::{self, IncomeEntry};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, instrument};

use crate::error::{ComputeError, Result};
use crate::period::{YearMonth, month_range};

/// Upserts the same income into every month from `start` to `end`.
///
/// All months are written in one transaction; the returned rows follow
/// calendar order.
#[instrument(skip(db))]
pub async fn upsert_income_range(
    db: &DatabaseConnection,
    user_id: i32,
    start: YearMonth,
    end: YearMonth,
    amount: Decimal,
    description: Option<String>,
) -> Result<Vec<monthly_income::Model>> {
    let months = month_range(start, end)?;
    if amount < Decimal::ZERO {
        return Err(ComputeError::validation("amount must not be negative"));
    }

    let txn = db.begin().await?;
    let mut rows = Vec::with_capacity(months.len());
    for period in months {
        let row = income::upsert(
            &txn,
            user_id,
            IncomeEntry {
                year: period.year,
                month: period.month_i32(),
                amount,
                description: description.clone(),
            },
        )
        .await?;
        rows.push(row);
    }
    txn.commit().await?;

    info!("Upserted income for {} months from {} to {}", rows.len(), start, end);
    Ok(rows)
}
