//! HTTP handlers for product category endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::auth::MessageResponse;
use crate::middleware::{require, CurrentUser};
use crate::services::category::{CategoryService, CreateCategoryInput, UpdateCategoryInput};
use crate::AppState;
use crate::models::{Action, Category, Resource};

/// List all categories
pub async fn list_categories(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Category>>> {
    let service = CategoryService::new(state.db);
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

/// Create a category
pub async fn create_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateCategoryInput>,
) -> AppResult<Json<Category>> {
    require(&current_user.0, Resource::Category, Action::Create)?;
    let service = CategoryService::new(state.db);
    let category = service.create_category(input).await?;
    Ok(Json(category))
}

/// Get a category by id
pub async fn get_category(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(category_id): Path<Uuid>,
) -> AppResult<Json<Category>> {
    let service = CategoryService::new(state.db);
    let category = service.get_category(category_id).await?;
    Ok(Json(category))
}

/// Update a category
pub async fn update_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<Uuid>,
    Json(input): Json<UpdateCategoryInput>,
) -> AppResult<Json<Category>> {
    require(&current_user.0, Resource::Category, Action::Edit)?;
    let service = CategoryService::new(state.db);
    let category = service.update_category(category_id, input).await?;
    Ok(Json(category))
}

/// Soft-delete a category
pub async fn delete_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    require(&current_user.0, Resource::Category, Action::Delete)?;
    let service = CategoryService::new(state.db);
    service.delete_category(category_id).await?;
    Ok(Json(MessageResponse {
        message: "Category deleted".to_string(),
    }))
}
