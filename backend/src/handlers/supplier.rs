//! HTTP handlers for supplier endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::auth::MessageResponse;
use crate::middleware::{require, CurrentUser};
use crate::services::supplier::{CreateSupplierInput, SupplierService, UpdateSupplierInput};
use crate::AppState;
use crate::models::{Action, Resource, Supplier};

/// List all suppliers
pub async fn list_suppliers(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.db);
    let suppliers = service.list_suppliers().await?;
    Ok(Json(suppliers))
}

/// Create a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    require(&current_user.0, Resource::Supplier, Action::Create)?;
    let service = SupplierService::new(state.db);
    let supplier = service.create_supplier(input).await?;
    Ok(Json(supplier))
}

/// Get a supplier by id
pub async fn get_supplier(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.get_supplier(supplier_id).await?;
    Ok(Json(supplier))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<UpdateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    require(&current_user.0, Resource::Supplier, Action::Edit)?;
    let service = SupplierService::new(state.db);
    let supplier = service.update_supplier(supplier_id, input).await?;
    Ok(Json(supplier))
}

/// Soft-delete a supplier
pub async fn delete_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    require(&current_user.0, Resource::Supplier, Action::Delete)?;
    let service = SupplierService::new(state.db);
    service.delete_supplier(supplier_id).await?;
    Ok(Json(MessageResponse {
        message: "Supplier deleted".to_string(),
    }))
}
