use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::{CategoryDto, CategoryListQuery, CreateCategoryRequest};
use tracing::{debug, instrument};

use crate::auth::AuthContext;
use crate::error::{ApiResult, ValidJson, ValidQuery};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use crate::services::categories;

/// List the user's categories
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(CategoryListQuery),
    responses(
        (status = 200, description = "Categories in creation order", body = ApiResponse<Vec<CategoryDto>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip(state, query))]
pub async fn list_categories(
    State(state): State<AppState>,
    auth: AuthContext,
    query: ValidQuery<CategoryListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<CategoryDto>>>> {
    let Valid(Query(query)) = query?;
    let unique = query.unique.unwrap_or(false);
    let data = categories::list(&state, auth.user_id, unique).await?;
    debug!("Listed {} categories (unique: {})", data.len(), unique);
    Ok(Json(ApiResponse::new(data, "Categories retrieved successfully")))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<CategoryDto>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip(state, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthContext,
    payload: ValidJson<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CategoryDto>>)> {
    let Valid(Json(request)) = payload?;
    let created = categories::create(&state, auth.user_id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(created, "Category created successfully")),
    ))
}

/// Delete a category; its expenses are kept
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted successfully"),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    categories::delete(&state, auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
