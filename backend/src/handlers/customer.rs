//! HTTP handlers for customer endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::auth::MessageResponse;
use crate::middleware::{require, CurrentUser};
use crate::services::customer::{CreateCustomerInput, CustomerService, UpdateCustomerInput};
use crate::AppState;
use crate::models::{Action, Customer, Resource};

/// List all customers
pub async fn list_customers(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Customer>>> {
    let service = CustomerService::new(state.db);
    let customers = service.list_customers().await?;
    Ok(Json(customers))
}

/// Create a customer
pub async fn create_customer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateCustomerInput>,
) -> AppResult<Json<Customer>> {
    require(&current_user.0, Resource::Customer, Action::Create)?;
    let service = CustomerService::new(state.db);
    let customer = service.create_customer(input).await?;
    Ok(Json(customer))
}

/// Get a customer by id
pub async fn get_customer(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(customer_id): Path<Uuid>,
) -> AppResult<Json<Customer>> {
    let service = CustomerService::new(state.db);
    let customer = service.get_customer(customer_id).await?;
    Ok(Json(customer))
}

/// Update a customer
pub async fn update_customer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(customer_id): Path<Uuid>,
    Json(input): Json<UpdateCustomerInput>,
) -> AppResult<Json<Customer>> {
    require(&current_user.0, Resource::Customer, Action::Edit)?;
    let service = CustomerService::new(state.db);
    let customer = service.update_customer(customer_id, input).await?;
    Ok(Json(customer))
}

/// Soft-delete a customer
pub async fn delete_customer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(customer_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    require(&current_user.0, Resource::Customer, Action::Delete)?;
    let service = CustomerService::new(state.db);
    service.delete_customer(customer_id).await?;
    Ok(Json(MessageResponse {
        message: "Customer deleted".to_string(),
    }))
}
