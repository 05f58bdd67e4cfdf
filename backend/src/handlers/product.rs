//! HTTP handlers for product catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::auth::MessageResponse;
use crate::middleware::{require, CurrentUser};
use crate::services::product::{CreateProductInput, ProductService, UpdateProductInput};
use crate::AppState;
use crate::models::{Action, Product, Resource};

/// List all products
pub async fn list_products(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db);
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateProductInput>,
) -> AppResult<Json<Product>> {
    require(&current_user.0, Resource::Product, Action::Create)?;
    let service = ProductService::new(state.db);
    let product = service.create_product(input).await?;
    Ok(Json(product))
}

/// Get a product by id
pub async fn get_product(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.get_product(product_id).await?;
    Ok(Json(product))
}

/// Update a product's catalog fields
pub async fn update_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    require(&current_user.0, Resource::Product, Action::Edit)?;
    let service = ProductService::new(state.db);
    let product = service.update_product(product_id, input).await?;
    Ok(Json(product))
}

/// Soft-delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    require(&current_user.0, Resource::Product, Action::Delete)?;
    let service = ProductService::new(state.db);
    service.delete_product(product_id).await?;
    Ok(Json(MessageResponse {
        message: "Product deleted".to_string(),
    }))
}
