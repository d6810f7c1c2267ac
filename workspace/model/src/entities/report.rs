use sea_orm::entity::prelude::*;

/// Metadata for a generated monthly PDF kept in the object store.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub year: i32,
    pub month: i32,
    /// Public URL returned by the object store.
    pub file_url: String,
    /// Object store key, needed to remove the blob.
    pub file_key: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
