use sea_orm::entity::prelude::*;

/// A user-defined expense category.
///
/// Names are not unique per user; duplicates are collapsed only when
/// categories are displayed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    /// Icon identifier used by the dashboard, e.g. "receipt".
    pub icon: Option<String>,
    /// Hex color, e.g. "#6366f1".
    pub color: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
