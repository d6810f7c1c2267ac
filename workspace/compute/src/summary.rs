use std::collections::HashMap;

use common::{CategoryBreakdown, MonthlySummary};
use model::entities::expense::{self, ExpenseType};
use model::entities::{category, monthly_income};
use model::store::{categories, expenses, income};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sea_orm::ConnectionTrait;
use tracing::{debug, instrument};

use crate::error::Result;

/// The three sources of a month, read once.
#[derive(Debug, Clone)]
pub struct MonthData {
    pub income: Option<monthly_income::Model>,
    pub expenses: Vec<expense::Model>,
    pub categories: Vec<category::Model>,
}

/// Summary plus the rows it was computed from.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub summary: MonthlySummary,
    pub expenses: Vec<expense::Model>,
    pub categories: Vec<category::Model>,
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Folds a month's rows into its summary.
///
/// Expenses whose category is unknown count towards the totals but not
/// towards `by_category`. Categories with no expense in the month are left
/// out; the rest keep the order of `categories`.
pub fn summarize(
    year: i32,
    month: i32,
    income: Option<&monthly_income::Model>,
    expenses: &[expense::Model],
    categories: &[category::Model],
) -> MonthlySummary {
    let total_income = income.map(|i| i.amount).unwrap_or(Decimal::ZERO);

    let mut fixed = Decimal::ZERO;
    let mut variable = Decimal::ZERO;
    let mut per_category: HashMap<i32, (Decimal, usize)> = HashMap::new();
    for e in expenses {
        match e.expense_type {
            ExpenseType::Fixed => fixed = fixed.saturating_add(e.amount),
            ExpenseType::Variable => variable = variable.saturating_add(e.amount),
        }
        let entry = per_category.entry(e.category_id).or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.saturating_add(e.amount);
        entry.1 += 1;
    }

    let total_expenses = fixed.saturating_add(variable);
    let by_category = categories
        .iter()
        .filter_map(|c| {
            let (total, count) = per_category.get(&c.id).copied()?;
            // share first, so the product stays within 100
            let percentage = total
                .checked_div(total_expenses)
                .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ZERO);
            Some(CategoryBreakdown {
                category_id: c.id,
                category_name: c.name.clone(),
                category_icon: c.icon.clone(),
                category_color: c.color.clone(),
                total: to_f64(total),
                count,
                percentage: to_f64(percentage),
            })
        })
        .collect();

    MonthlySummary {
        year,
        month,
        total_income: to_f64(total_income),
        fixed_expenses: to_f64(fixed),
        variable_expenses: to_f64(variable),
        total_expenses: to_f64(total_expenses),
        balance: to_f64(total_income.saturating_sub(total_expenses)),
        by_category,
        expenses_count: expenses.len(),
    }
}

/// Reads the sources of a month and aggregates them.
#[derive(Debug, Default)]
pub struct SummaryComputer;

impl SummaryComputer {
    pub fn new() -> Self {
        Self
    }

    /// Reads income, expenses and categories concurrently. Any failed read
    /// fails the whole load.
    #[instrument(skip(self, db))]
    pub async fn load<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i32,
        year: i32,
        month: i32,
    ) -> Result<MonthData> {
        let (income, expenses, categories) = tokio::try_join!(
            income::get(db, user_id, year, month),
            expenses::list_for_period(db, user_id, year, month),
            categories::list(db, user_id),
        )?;

        debug!(
            "Loaded {} expenses and {} categories for {}-{}",
            expenses.len(),
            categories.len(),
            year,
            month
        );
        Ok(MonthData {
            income,
            expenses,
            categories,
        })
    }

    #[instrument(skip(self, db))]
    pub async fn monthly_summary<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i32,
        year: i32,
        month: i32,
    ) -> Result<MonthlySummary> {
        let data = self.load(db, user_id, year, month).await?;
        Ok(summarize(
            year,
            month,
            data.income.as_ref(),
            &data.expenses,
            &data.categories,
        ))
    }

    /// Summary, expense list and category list from a single load.
    #[instrument(skip(self, db))]
    pub async fn dashboard<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i32,
        year: i32,
        month: i32,
    ) -> Result<Dashboard> {
        let data = self.load(db, user_id, year, month).await?;
        let summary = summarize(
            year,
            month,
            data.income.as_ref(),
            &data.expenses,
            &data.categories,
        );
        Ok(Dashboard {
            summary,
            expenses: data.expenses,
            categories: data.categories,
        })
    }
}
