use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether an expense repeats every month or happens once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    #[sea_orm(string_value = "fixed")]
    Fixed,
    #[sea_orm(string_value = "variable")]
    Variable,
}

/// A single expense row for one month.
///
/// Rows that share a `group_id` form a series: the same fixed expense
/// materialized once per month of a range.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    /// Not a foreign key: expenses survive the deletion of their category.
    pub category_id: i32,
    pub year: i32,
    pub month: i32,
    pub group_id: Option<String>,
    pub paid: bool,
    #[sea_orm(column_name = "type")]
    pub expense_type: ExpenseType,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
