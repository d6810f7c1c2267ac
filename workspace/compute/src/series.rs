//! Materialization of an expense over a range of months.
//!
//! Planning is pure: [`plan_new_series`] and [`plan_series_edit`] turn a
//! template, a month range and the rows that already exist into a list of
//! [`SeriesOp`]s. [`apply_plan`] then runs that list inside one transaction.

use std::collections::{BTreeMap, HashSet};

use common::SeriesResult;
use model::entities::expense::{self, ExpenseType};
use model::store::StoreError;
use model::store::expenses::{self, ExpenseChanges, NewExpense};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::{debug, info, instrument};

use crate::error::{ComputeError, Result};
use crate::period::{YearMonth, month_range};

/// Values every row of a series carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseTemplate {
    pub category_id: i32,
    pub expense_type: ExpenseType,
    pub description: String,
    pub amount: Decimal,
}

impl ExpenseTemplate {
    fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(ComputeError::validation("amount must be greater than zero"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOp {
    /// Insert a new unpaid row in a free month.
    Create { period: YearMonth },
    /// Overwrite an existing row with the template, keeping its id.
    Update { id: i32, period: YearMonth },
    Delete { id: i32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPlan {
    /// `None` when the result is a single ungrouped row.
    pub group_id: Option<String>,
    pub template: ExpenseTemplate,
    pub ops: Vec<SeriesOp>,
}

impl SeriesPlan {
    pub fn created(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, SeriesOp::Create { .. })).count()
    }

    pub fn updated(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, SeriesOp::Update { .. })).count()
    }

    pub fn deleted(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, SeriesOp::Delete { .. })).count()
    }
}

/// A fresh series identifier, `grp_` followed by a v4 uuid.
pub fn new_group_id() -> String {
    format!("grp_{}", uuid::Uuid::new_v4())
}

/// Matches existing rows against the target months.
///
/// Occupied months are updated, free months created, rows outside the
/// range deleted. When several rows share a month the one with the lowest
/// id stays and the others are deleted.
pub fn reconcile(existing: &[expense::Model], range: &[YearMonth]) -> Vec<SeriesOp> {
    let mut by_slot: BTreeMap<String, Vec<i32>> = BTreeMap::new();
    for row in existing {
        by_slot
            .entry(format!("{}-{}", row.year, row.month))
            .or_default()
            .push(row.id);
    }
    for ids in by_slot.values_mut() {
        ids.sort_unstable();
    }

    let mut kept = HashSet::new();
    let mut ops = Vec::with_capacity(range.len());
    for &period in range {
        match by_slot.get(&period.slot_key()).and_then(|ids| ids.first()) {
            Some(&id) => {
                kept.insert(id);
                ops.push(SeriesOp::Update { id, period });
            }
            None => ops.push(SeriesOp::Create { period }),
        }
    }

    let mut stale: Vec<i32> = existing
        .iter()
        .map(|row| row.id)
        .filter(|id| !kept.contains(id))
        .collect();
    stale.sort_unstable();
    stale.dedup();
    ops.extend(stale.into_iter().map(|id| SeriesOp::Delete { id }));
    ops
}

/// A brand-new series. Fixed expenses get one row per month, variable ones
/// a single row in the start month.
pub fn plan_new_series(
    template: ExpenseTemplate,
    start: YearMonth,
    end: YearMonth,
) -> Result<SeriesPlan> {
    let range = month_range(start, end)?;
    template.validate()?;

    let ops = match template.expense_type {
        ExpenseType::Fixed => range
            .into_iter()
            .map(|period| SeriesOp::Create { period })
            .collect(),
        ExpenseType::Variable => vec![SeriesOp::Create { period: start }],
    };

    Ok(SeriesPlan {
        group_id: Some(new_group_id()),
        template,
        ops,
    })
}

/// Re-materializes the series `current` belongs to.
///
/// `members` are the rows sharing `current.group_id` (ignored when the row
/// is ungrouped). Turning the expense variable collapses the series onto
/// `current`; an ungrouped row edited over its own single month stays
/// ungrouped; anything else becomes, or stays, a series.
pub fn plan_series_edit(
    current: &expense::Model,
    members: &[expense::Model],
    template: ExpenseTemplate,
    start: YearMonth,
    end: YearMonth,
) -> Result<SeriesPlan> {
    let range = month_range(start, end)?;
    template.validate()?;

    let own_period = YearMonth::new(current.year, current.month)?;
    let in_place = SeriesOp::Update {
        id: current.id,
        period: own_period,
    };

    if template.expense_type == ExpenseType::Variable {
        let mut ops = vec![in_place];
        if current.group_id.is_some() {
            ops.extend(
                members
                    .iter()
                    .filter(|row| row.id != current.id)
                    .map(|row| SeriesOp::Delete { id: row.id }),
            );
        }
        return Ok(SeriesPlan {
            group_id: None,
            template,
            ops,
        });
    }

    match &current.group_id {
        None if range.len() == 1 && range[0] == own_period => Ok(SeriesPlan {
            group_id: None,
            template,
            ops: vec![in_place],
        }),
        None => Ok(SeriesPlan {
            group_id: Some(new_group_id()),
            ops: reconcile(std::slice::from_ref(current), &range),
            template,
        }),
        Some(group_id) => {
            let mut existing: Vec<expense::Model> = members.to_vec();
            if !existing.iter().any(|row| row.id == current.id) {
                existing.push(current.clone());
            }
            Ok(SeriesPlan {
                group_id: Some(group_id.clone()),
                ops: reconcile(&existing, &range),
                template,
            })
        }
    }
}

async fn execute<C: ConnectionTrait>(db: &C, user_id: i32, plan: &SeriesPlan) -> Result<()> {
    let template = &plan.template;
    for op in &plan.ops {
        match *op {
            SeriesOp::Create { period } => {
                expenses::create(
                    db,
                    user_id,
                    NewExpense {
                        category_id: template.category_id,
                        year: period.year,
                        month: period.month_i32(),
                        group_id: plan.group_id.clone(),
                        paid: false,
                        expense_type: template.expense_type,
                        description: template.description.clone(),
                        amount: template.amount,
                    },
                )
                .await?;
            }
            SeriesOp::Update { id, .. } => {
                expenses::update(
                    db,
                    user_id,
                    id,
                    ExpenseChanges {
                        category_id: Some(template.category_id),
                        group_id: Some(plan.group_id.clone()),
                        paid: None,
                        expense_type: Some(template.expense_type),
                        description: Some(template.description.clone()),
                        amount: Some(template.amount),
                    },
                )
                .await?;
            }
            SeriesOp::Delete { id } => expenses::delete(db, user_id, id).await?,
        }
    }
    Ok(())
}

fn outcome(plan: &SeriesPlan) -> SeriesResult {
    SeriesResult {
        group_id: plan.group_id.clone(),
        created: plan.created(),
        updated: plan.updated(),
        deleted: plan.deleted(),
    }
}

/// Runs every operation of the plan in one transaction.
#[instrument(skip(db, plan), fields(group_id = ?plan.group_id, ops = plan.ops.len()))]
pub async fn apply_plan(
    db: &DatabaseConnection,
    user_id: i32,
    plan: &SeriesPlan,
) -> Result<SeriesResult> {
    let txn = db.begin().await?;
    execute(&txn, user_id, plan).await?;
    txn.commit().await?;

    let result = outcome(plan);
    info!(
        "Applied series plan: {} created, {} updated, {} deleted",
        result.created, result.updated, result.deleted
    );
    Ok(result)
}

/// Creates a new series over `start..=end`.
#[instrument(skip(db, template))]
pub async fn create_series(
    db: &DatabaseConnection,
    user_id: i32,
    template: ExpenseTemplate,
    start: YearMonth,
    end: YearMonth,
) -> Result<SeriesResult> {
    let plan = plan_new_series(template, start, end)?;
    apply_plan(db, user_id, &plan).await
}

/// Re-materializes the series of expense `id` over `start..=end`.
///
/// The rows are read and rewritten inside the same transaction.
#[instrument(skip(db, template))]
pub async fn edit_series(
    db: &DatabaseConnection,
    user_id: i32,
    id: i32,
    template: ExpenseTemplate,
    start: YearMonth,
    end: YearMonth,
) -> Result<SeriesResult> {
    month_range(start, end)?;
    template.validate()?;

    let txn = db.begin().await?;
    let current = expenses::find(&txn, user_id, id)
        .await?
        .ok_or(StoreError::NotFound { entity: "Expense", id })?;
    let members = match &current.group_id {
        Some(group_id) => expenses::list_for_group(&txn, user_id, group_id).await?,
        None => Vec::new(),
    };
    debug!("Expense {} has {} series members", id, members.len());

    let plan = plan_series_edit(&current, &members, template, start, end)?;
    execute(&txn, user_id, &plan).await?;
    txn.commit().await?;

    let result = outcome(&plan);
    info!(
        "Edited series of expense {}: {} created, {} updated, {} deleted",
        id, result.created, result.updated, result.deleted
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::setup_db;
    use chrono::Utc;
    use sea_orm::{Database, PaginatorTrait, EntityTrait};

    fn ym(year: i32, month: i32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn template(kind: ExpenseType) -> ExpenseTemplate {
        ExpenseTemplate {
            category_id: 1,
            expense_type: kind,
            description: "Gym".to_string(),
            amount: Decimal::new(3500, 2),
        }
    }

    fn row(id: i32, year: i32, month: i32, group_id: Option<&str>) -> expense::Model {
        expense::Model {
            id,
            user_id: 1,
            category_id: 1,
            year,
            month,
            group_id: group_id.map(str::to_string),
            paid: false,
            expense_type: ExpenseType::Fixed,
            description: "Gym".to_string(),
            amount: Decimal::new(3500, 2),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_reconcile_shifted_range() {
        let existing = vec![
            row(1, 2024, 1, Some("g")),
            row(2, 2024, 2, Some("g")),
            row(3, 2024, 3, Some("g")),
        ];
        let range = month_range(ym(2024, 2), ym(2024, 4)).unwrap();

        let ops = reconcile(&existing, &range);
        assert_eq!(
            ops,
            vec![
                SeriesOp::Update { id: 2, period: ym(2024, 2) },
                SeriesOp::Update { id: 3, period: ym(2024, 3) },
                SeriesOp::Create { period: ym(2024, 4) },
                SeriesOp::Delete { id: 1 },
            ]
        );
    }

    #[test]
    fn test_reconcile_duplicate_slot_keeps_lowest_id() {
        let existing = vec![row(9, 2025, 1, Some("g")), row(4, 2025, 1, Some("g"))];
        let ops = reconcile(&existing, &[ym(2025, 1)]);
        assert_eq!(
            ops,
            vec![
                SeriesOp::Update { id: 4, period: ym(2025, 1) },
                SeriesOp::Delete { id: 9 },
            ]
        );
    }

    #[test]
    fn test_new_fixed_series_one_row_per_month() {
        let plan = plan_new_series(template(ExpenseType::Fixed), ym(2024, 11), ym(2025, 2)).unwrap();
        assert_eq!(plan.created(), 4);
        assert!(plan.group_id.as_deref().unwrap().starts_with("grp_"));
    }

    #[test]
    fn test_new_variable_series_single_row() {
        let plan = plan_new_series(template(ExpenseType::Variable), ym(2025, 1), ym(2025, 6)).unwrap();
        assert_eq!(plan.ops, vec![SeriesOp::Create { period: ym(2025, 1) }]);
        assert!(plan.group_id.is_some());
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let mut zero = template(ExpenseType::Fixed);
        zero.amount = Decimal::ZERO;
        let err = plan_new_series(zero, ym(2025, 1), ym(2025, 2)).unwrap_err();
        assert!(matches!(err, ComputeError::Validation(_)));
    }

    #[test]
    fn test_edit_ungrouped_same_month_stays_in_place() {
        let current = row(5, 2025, 3, None);
        let plan = plan_series_edit(&current, &[], template(ExpenseType::Fixed), ym(2025, 3), ym(2025, 3)).unwrap();
        assert_eq!(plan.group_id, None);
        assert_eq!(plan.ops, vec![SeriesOp::Update { id: 5, period: ym(2025, 3) }]);
    }

    #[test]
    fn test_edit_ungrouped_promotes_to_series() {
        let current = row(5, 2025, 3, None);
        let plan = plan_series_edit(&current, &[], template(ExpenseType::Fixed), ym(2025, 3), ym(2025, 5)).unwrap();
        assert!(plan.group_id.as_deref().unwrap().starts_with("grp_"));
        assert_eq!(plan.updated(), 1);
        assert_eq!(plan.created(), 2);
        assert_eq!(plan.deleted(), 0);
    }

    #[test]
    fn test_edit_ungrouped_outside_range_moves_row() {
        let current = row(5, 2025, 1, None);
        let plan = plan_series_edit(&current, &[], template(ExpenseType::Fixed), ym(2025, 3), ym(2025, 3)).unwrap();
        assert!(plan.group_id.is_some());
        assert_eq!(plan.created(), 1);
        assert_eq!(plan.ops.last(), Some(&SeriesOp::Delete { id: 5 }));
    }

    #[test]
    fn test_edit_to_variable_collapses_group() {
        let members = vec![row(1, 2025, 1, Some("g")), row(2, 2025, 2, Some("g")), row(3, 2025, 3, Some("g"))];
        let plan = plan_series_edit(&members[1], &members, template(ExpenseType::Variable), ym(2025, 1), ym(2025, 3)).unwrap();
        assert_eq!(plan.group_id, None);
        assert_eq!(
            plan.ops,
            vec![
                SeriesOp::Update { id: 2, period: ym(2025, 2) },
                SeriesOp::Delete { id: 1 },
                SeriesOp::Delete { id: 3 },
            ]
        );
    }

    #[test]
    fn test_edit_grouped_keeps_group_id() {
        let members = vec![row(1, 2025, 1, Some("grp_a")), row(2, 2025, 2, Some("grp_a"))];
        let plan = plan_series_edit(&members[0], &members, template(ExpenseType::Fixed), ym(2025, 2), ym(2025, 2)).unwrap();
        assert_eq!(plan.group_id.as_deref(), Some("grp_a"));
        assert_eq!(plan.ops, vec![SeriesOp::Update { id: 2, period: ym(2025, 2) }, SeriesOp::Delete { id: 1 }]);
    }

    #[tokio::test]
    async fn test_inverted_range_rejected_before_store() {
        // No migrations: any query would fail with a database error instead.
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let err = create_series(&db, 1, template(ExpenseType::Fixed), ym(2025, 6), ym(2025, 3))
            .await
            .unwrap_err();
        assert!(matches!(err, ComputeError::Validation(_)));

        let err = edit_series(&db, 1, 1, template(ExpenseType::Fixed), ym(2025, 6), ym(2025, 3))
            .await
            .unwrap_err();
        assert!(matches!(err, ComputeError::Validation(_)));
    }

    #[tokio::test]
    async fn test_series_round_trip_against_store() {
        let db = setup_db().await;

        let created = create_series(&db, 1, template(ExpenseType::Fixed), ym(2024, 1), ym(2024, 3))
            .await
            .unwrap();
        assert_eq!(created.created, 3);
        let group_id = created.group_id.clone().unwrap();

        let rows = expenses::list_for_group(&db, 1, &group_id).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| !r.paid));
        let kept_ids: Vec<i32> = rows[1..].iter().map(|r| r.id).collect();

        let mut changed = template(ExpenseType::Fixed);
        changed.amount = Decimal::new(4000, 2);
        let edited = edit_series(&db, 1, rows[0].id, changed, ym(2024, 2), ym(2024, 4))
            .await
            .unwrap();
        assert_eq!((edited.created, edited.updated, edited.deleted), (1, 2, 1));
        assert_eq!(edited.group_id.as_deref(), Some(group_id.as_str()));

        let rows = expenses::list_for_group(&db, 1, &group_id).await.unwrap();
        let periods: Vec<(i32, i32)> = rows.iter().map(|r| (r.year, r.month)).collect();
        assert_eq!(periods, vec![(2024, 2), (2024, 3), (2024, 4)]);
        assert_eq!(rows[0].id, kept_ids[0]);
        assert_eq!(rows[1].id, kept_ids[1]);
        assert!(rows.iter().all(|r| r.amount == Decimal::new(4000, 2)));
    }

    #[tokio::test]
    async fn test_failed_plan_rolls_back() {
        let db = setup_db().await;
        let plan = SeriesPlan {
            group_id: Some("grp_rollback".to_string()),
            template: template(ExpenseType::Fixed),
            ops: vec![
                SeriesOp::Create { period: ym(2025, 1) },
                SeriesOp::Delete { id: 12345 },
            ],
        };

        let err = apply_plan(&db, 1, &plan).await.unwrap_err();
        assert!(matches!(err, ComputeError::Store(StoreError::NotFound { .. })));

        let count = expense::Entity::find().count(&db).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_edit_missing_expense_is_not_found() {
        let db = setup_db().await;
        let err = edit_series(&db, 1, 77, template(ExpenseType::Fixed), ym(2025, 1), ym(2025, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, ComputeError::Store(StoreError::NotFound { id: 77, .. })));
    }
}
