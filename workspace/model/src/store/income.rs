use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};
use tracing::{debug, instrument};

use super::{Result, StoreError, context};
use crate::entities::monthly_income;

/// Income values for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeEntry {
    pub year: i32,
    pub month: i32,
    pub amount: Decimal,
    pub description: Option<String>,
}

#[instrument(skip(db))]
pub async fn get<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    year: i32,
    month: i32,
) -> Result<Option<monthly_income::Model>> {
    monthly_income::Entity::find()
        .filter(monthly_income::Column::UserId.eq(user_id))
        .filter(monthly_income::Column::Year.eq(year))
        .filter(monthly_income::Column::Month.eq(month))
        .one(db)
        .await
        .map_err(context("Failed to get monthly income"))
}

/// Inserts the income of a period or overwrites its amount and description.
///
/// Relies on the unique `(user_id, year, month)` index, so concurrent
/// upserts for the same period never produce a second row.
#[instrument(skip(db))]
pub async fn upsert<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    entry: IncomeEntry,
) -> Result<monthly_income::Model> {
    let now = Utc::now();
    let row = monthly_income::ActiveModel {
        user_id: Set(user_id),
        year: Set(entry.year),
        month: Set(entry.month),
        amount: Set(entry.amount),
        description: Set(entry.description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    monthly_income::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([
                monthly_income::Column::UserId,
                monthly_income::Column::Year,
                monthly_income::Column::Month,
            ])
            .update_columns([
                monthly_income::Column::Amount,
                monthly_income::Column::Description,
                monthly_income::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map_err(context("Failed to upsert monthly income"))?;

    debug!("Upserted income for {}-{}", entry.year, entry.month);

    get(db, user_id, entry.year, entry.month)
        .await?
        .ok_or_else(|| StoreError::Query {
            context: "Failed to upsert monthly income",
            source: DbErr::RecordNotFound(format!(
                "monthly income {}-{} missing after upsert",
                entry.year, entry.month
            )),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::setup_db;
    use sea_orm::PaginatorTrait;
    use std::str::FromStr;

    fn entry(amount: &str, description: Option<&str>) -> IncomeEntry {
        IncomeEntry {
            year: 2025,
            month: 1,
            amount: Decimal::from_str(amount).unwrap(),
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_get_missing_period_is_none() {
        let db = setup_db().await;
        assert!(get(&db, 1, 2025, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_twice_keeps_one_row_with_latest_values() {
        let db = setup_db().await;

        let first = upsert(&db, 1, entry("3000.00", Some("Salary"))).await.unwrap();
        let second = upsert(&db, 1, entry("3500.50", None)).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.amount, Decimal::from_str("3500.50").unwrap());
        assert_eq!(second.description, None);

        let rows = monthly_income::Entity::find()
            .filter(monthly_income::Column::UserId.eq(1))
            .count(&db)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_upsert_is_scoped_to_user() {
        let db = setup_db().await;

        upsert(&db, 1, entry("1000", None)).await.unwrap();
        upsert(&db, 2, entry("2000", None)).await.unwrap();

        let mine = get(&db, 1, 2025, 1).await.unwrap().unwrap();
        assert_eq!(mine.amount, Decimal::from(1000));
        let theirs = get(&db, 2, 2025, 1).await.unwrap().unwrap();
        assert_eq!(theirs.amount, Decimal::from(2000));
    }
}
