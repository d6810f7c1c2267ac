use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{CategoryDto, ExpenseDto};

/// Aggregated figures of one month.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: i32,
    pub total_income: f64,
    pub fixed_expenses: f64,
    pub variable_expenses: f64,
    pub total_expenses: f64,
    /// Income minus total expenses, may be negative
    pub balance: f64,
    pub by_category: Vec<CategoryBreakdown>,
    pub expenses_count: usize,
}

/// Spending of one category within a month.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category_id: i32,
    pub category_name: String,
    pub category_icon: Option<String>,
    pub category_color: Option<String>,
    pub total: f64,
    pub count: usize,
    /// Share of the month's total expenses, 0 to 100
    pub percentage: f64,
}

/// Everything the dashboard renders for a period.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub summary: MonthlySummary,
    pub expenses: Vec<ExpenseDto>,
    pub categories: Vec<CategoryDto>,
}
