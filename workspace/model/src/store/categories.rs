use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{debug, instrument};

use super::{Result, StoreError, context};
use crate::entities::category;

/// Icon assigned when a category is created without one.
pub const DEFAULT_ICON: &str = "receipt";
/// Color assigned when a category is created without one.
pub const DEFAULT_COLOR: &str = "#6366f1";

/// Fields needed to insert a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl NewCategory {
    /// A category with the default icon and color.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
            color: None,
        }
    }
}

/// All categories of a user in creation order.
#[instrument(skip(db))]
pub async fn list<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Vec<category::Model>> {
    category::Entity::find()
        .filter(category::Column::UserId.eq(user_id))
        .order_by_asc(category::Column::CreatedAt)
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(context("Failed to list categories"))
}

#[instrument(skip(db))]
pub async fn create<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    new_category: NewCategory,
) -> Result<category::Model> {
    let row = category::ActiveModel {
        user_id: Set(user_id),
        name: Set(new_category.name),
        icon: Set(Some(new_category.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()))),
        color: Set(Some(new_category.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()))),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let created = row.insert(db).await.map_err(context("Failed to create category"))?;
    debug!("Created category {} ({})", created.id, created.name);
    Ok(created)
}

/// Deletes a category. Expenses pointing at it are left untouched.
#[instrument(skip(db))]
pub async fn delete<C: ConnectionTrait>(db: &C, user_id: i32, id: i32) -> Result<()> {
    let result = category::Entity::delete_many()
        .filter(category::Column::Id.eq(id))
        .filter(category::Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(context("Failed to delete category"))?;

    if result.rows_affected == 0 {
        return Err(StoreError::NotFound { entity: "Category", id });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::setup_db;

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let db = setup_db().await;

        let created = create(&db, 1, NewCategory::named("Groceries")).await.unwrap();

        assert_eq!(created.user_id, 1);
        assert_eq!(created.name, "Groceries");
        assert_eq!(created.icon.as_deref(), Some(DEFAULT_ICON));
        assert_eq!(created.color.as_deref(), Some(DEFAULT_COLOR));
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_user_and_ordered() {
        let db = setup_db().await;

        create(&db, 1, NewCategory::named("Rent")).await.unwrap();
        create(&db, 2, NewCategory::named("Other user")).await.unwrap();
        create(&db, 1, NewCategory::named("Food")).await.unwrap();

        let categories = list(&db, 1).await.unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Food"]);
    }

    #[tokio::test]
    async fn test_duplicate_names_are_accepted() {
        let db = setup_db().await;

        create(&db, 1, NewCategory::named("Food")).await.unwrap();
        create(&db, 1, NewCategory::named("food")).await.unwrap();

        assert_eq!(list(&db, 1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_other_users_category_is_not_found() {
        let db = setup_db().await;
        let created = create(&db, 1, NewCategory::named("Rent")).await.unwrap();

        let err = delete(&db, 2, created.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "Category", .. }));

        delete(&db, 1, created.id).await.unwrap();
        assert!(list(&db, 1).await.unwrap().is_empty());
    }
}
