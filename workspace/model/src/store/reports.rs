use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, instrument};

use super::{Result, StoreError, context};
use crate::entities::report;

/// Metadata of an uploaded report blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub year: i32,
    pub month: i32,
    pub file_url: String,
    pub file_key: String,
}

/// Reports of a user, most recent period first.
#[instrument(skip(db))]
pub async fn list<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Vec<report::Model>> {
    report::Entity::find()
        .filter(report::Column::UserId.eq(user_id))
        .order_by_desc(report::Column::Year)
        .order_by_desc(report::Column::Month)
        .order_by_desc(report::Column::CreatedAt)
        .order_by_desc(report::Column::Id)
        .all(db)
        .await
        .map_err(context("Failed to list reports"))
}

/// The latest report generated for a period, if any.
#[instrument(skip(db))]
pub async fn get_for_period<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    year: i32,
    month: i32,
) -> Result<Option<report::Model>> {
    report::Entity::find()
        .filter(report::Column::UserId.eq(user_id))
        .filter(report::Column::Year.eq(year))
        .filter(report::Column::Month.eq(month))
        .order_by_desc(report::Column::CreatedAt)
        .order_by_desc(report::Column::Id)
        .one(db)
        .await
        .map_err(context("Failed to get report"))
}

#[instrument(skip(db))]
pub async fn create<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    new_report: NewReport,
) -> Result<report::Model> {
    let row = report::ActiveModel {
        user_id: Set(user_id),
        year: Set(new_report.year),
        month: Set(new_report.month),
        file_url: Set(new_report.file_url),
        file_key: Set(new_report.file_key),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let created = row.insert(db).await.map_err(context("Failed to create report"))?;
    debug!("Created report {} for {}-{}", created.id, created.year, created.month);
    Ok(created)
}

/// Removes the row and hands it back so the caller can drop the blob.
#[instrument(skip(db))]
pub async fn delete<C: ConnectionTrait>(db: &C, user_id: i32, id: i32) -> Result<report::Model> {
    let existing = report::Entity::find_by_id(id)
        .filter(report::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(context("Failed to get report"))?
        .ok_or(StoreError::NotFound { entity: "Report", id })?;

    existing
        .clone()
        .delete(db)
        .await
        .map_err(context("Failed to delete report"))?;
    Ok(existing)
}
