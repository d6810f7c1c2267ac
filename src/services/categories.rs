use common::{CategoryDto, CreateCategoryRequest};
use compute::categories::unique_by_name;
use model::store::categories::{self, NewCategory};
use sea_orm::ConnectionTrait;
use tracing::{debug, instrument};

use super::dto::IntoDto;
use crate::error::{ApiError, ApiResult};
use crate::schemas::AppState;

const MAX_NAME_LEN: usize = 100;

#[instrument(skip(state))]
pub async fn list(state: &AppState, user_id: i32, unique: bool) -> ApiResult<Vec<CategoryDto>> {
    let rows = categories::list(&state.db, user_id).await?;
    let rows = if unique { unique_by_name(rows) } else { rows };
    Ok(rows.into_dto())
}

/// The name is trimmed before the length rules are applied.
#[instrument(skip(state))]
pub async fn create(
    state: &AppState,
    user_id: i32,
    request: CreateCategoryRequest,
) -> ApiResult<CategoryDto> {
    let created = create_named(
        &state.db,
        user_id,
        NewCategory {
            name: request.name,
            icon: request.icon,
            color: request.color,
        },
    )
    .await?;
    Ok(created.into_dto())
}

/// Shared by explicit creation and by expenses naming a new category.
pub(crate) async fn create_named<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    mut new_category: NewCategory,
) -> ApiResult<model::entities::category::Model> {
    let name = new_category.name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::validation(format!(
            "Category name must be between 1 and {MAX_NAME_LEN} characters"
        )));
    }
    new_category.name = name.to_string();

    let created = categories::create(db, user_id, new_category).await?;
    debug!("Category {} available as '{}'", created.id, created.name);
    Ok(created)
}

#[instrument(skip(state))]
pub async fn delete(state: &AppState, user_id: i32, id: i32) -> ApiResult<()> {
    categories::delete(&state.db, user_id, id).await?;
    Ok(())
}
