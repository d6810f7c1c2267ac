use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, instrument};

use super::{Result, StoreError, context};
use crate::entities::expense::{self, ExpenseType};

/// Fields needed to insert an expense row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub category_id: i32,
    pub year: i32,
    pub month: i32,
    pub group_id: Option<String>,
    pub paid: bool,
    pub expense_type: ExpenseType,
    pub description: String,
    pub amount: Decimal,
}

/// A partial update. `None` leaves the column unchanged; for `group_id`,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseChanges {
    pub category_id: Option<i32>,
    pub group_id: Option<Option<String>>,
    pub paid: Option<bool>,
    pub expense_type: Option<ExpenseType>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
}

/// Expenses of a period, newest first.
#[instrument(skip(db))]
pub async fn list_for_period<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    year: i32,
    month: i32,
) -> Result<Vec<expense::Model>> {
    expense::Entity::find()
        .filter(expense::Column::UserId.eq(user_id))
        .filter(expense::Column::Year.eq(year))
        .filter(expense::Column::Month.eq(month))
        .order_by_desc(expense::Column::CreatedAt)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(context("Failed to list expenses"))
}

#[instrument(skip(db))]
pub async fn list_for_category<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    year: i32,
    month: i32,
    category_id: i32,
) -> Result<Vec<expense::Model>> {
    expense::Entity::find()
        .filter(expense::Column::UserId.eq(user_id))
        .filter(expense::Column::Year.eq(year))
        .filter(expense::Column::Month.eq(month))
        .filter(expense::Column::CategoryId.eq(category_id))
        .order_by_desc(expense::Column::CreatedAt)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(context("Failed to list expenses by category"))
}

/// Every row of a series in calendar order.
#[instrument(skip(db))]
pub async fn list_for_group<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    group_id: &str,
) -> Result<Vec<expense::Model>> {
    expense::Entity::find()
        .filter(expense::Column::UserId.eq(user_id))
        .filter(expense::Column::GroupId.eq(group_id))
        .order_by_asc(expense::Column::Year)
        .order_by_asc(expense::Column::Month)
        .order_by_asc(expense::Column::Id)
        .all(db)
        .await
        .map_err(context("Failed to list expenses by group"))
}

#[instrument(skip(db))]
pub async fn find<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    id: i32,
) -> Result<Option<expense::Model>> {
    expense::Entity::find_by_id(id)
        .filter(expense::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(context("Failed to get expense"))
}

#[instrument(skip(db))]
pub async fn create<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    new_expense: NewExpense,
) -> Result<expense::Model> {
    let now = Utc::now();
    let row = expense::ActiveModel {
        user_id: Set(user_id),
        category_id: Set(new_expense.category_id),
        year: Set(new_expense.year),
        month: Set(new_expense.month),
        group_id: Set(new_expense.group_id),
        paid: Set(new_expense.paid),
        expense_type: Set(new_expense.expense_type),
        description: Set(new_expense.description),
        amount: Set(new_expense.amount),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = row.insert(db).await.map_err(context("Failed to create expense"))?;
    debug!("Created expense {} for {}-{}", created.id, created.year, created.month);
    Ok(created)
}

#[instrument(skip(db))]
pub async fn update<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    id: i32,
    changes: ExpenseChanges,
) -> Result<expense::Model> {
    let existing = find(db, user_id, id)
        .await?
        .ok_or(StoreError::NotFound { entity: "Expense", id })?;

    let mut row: expense::ActiveModel = existing.into();
    if let Some(category_id) = changes.category_id {
        row.category_id = Set(category_id);
    }
    if let Some(group_id) = changes.group_id {
        row.group_id = Set(group_id);
    }
    if let Some(paid) = changes.paid {
        row.paid = Set(paid);
    }
    if let Some(expense_type) = changes.expense_type {
        row.expense_type = Set(expense_type);
    }
    if let Some(description) = changes.description {
        row.description = Set(description);
    }
    if let Some(amount) = changes.amount {
        row.amount = Set(amount);
    }
    row.updated_at = Set(Utc::now());

    row.update(db).await.map_err(context("Failed to update expense"))
}

#[instrument(skip(db))]
pub async fn delete<C: ConnectionTrait>(db: &C, user_id: i32, id: i32) -> Result<()> {
    let result = expense::Entity::delete_many()
        .filter(expense::Column::Id.eq(id))
        .filter(expense::Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(context("Failed to delete expense"))?;

    if result.rows_affected == 0 {
        return Err(StoreError::NotFound { entity: "Expense", id });
    }
    Ok(())
}

/// Sets the paid flag on every listed expense the user owns.
/// Returns the number of rows changed.
#[instrument(skip(db))]
pub async fn set_paid<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    ids: &[i32],
    paid: bool,
) -> Result<u64> {
    let result = expense::Entity::update_many()
        .col_expr(expense::Column::Paid, Expr::value(paid))
        .col_expr(expense::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(expense::Column::UserId.eq(user_id))
        .filter(expense::Column::Id.is_in(ids.iter().copied()))
        .exec(db)
        .await
        .map_err(context("Failed to update expenses paid status"))?;

    Ok(result.rows_affected)
}
