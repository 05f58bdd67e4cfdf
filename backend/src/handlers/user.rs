//! HTTP handlers for user administration endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::auth::MessageResponse;
use crate::middleware::{require, CurrentUser};
use crate::services::user::{CreateUserInput, UpdateUserInput, UserService};
use crate::AppState;
use crate::models::{Action, Resource, User};

/// List all users
pub async fn list_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    require(&current_user.0, Resource::User, Action::View)?;
    let service = UserService::new(state.db);
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Create a user account
pub async fn create_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateUserInput>,
) -> AppResult<Json<User>> {
    require(&current_user.0, Resource::User, Action::Create)?;
    let service = UserService::new(state.db);
    let user = service.create_user(input).await?;
    Ok(Json(user))
}

/// Get a user by id
pub async fn get_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<User>> {
    require(&current_user.0, Resource::User, Action::View)?;
    let service = UserService::new(state.db);
    let user = service.get_user(user_id).await?;
    Ok(Json(user))
}

/// Update a user account
pub async fn update_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(input): Json<UpdateUserInput>,
) -> AppResult<Json<User>> {
    require(&current_user.0, Resource::User, Action::Edit)?;
    let service = UserService::new(state.db);
    let user = service.update_user(user_id, input).await?;
    Ok(Json(user))
}

/// Soft-delete a user account
pub async fn delete_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    require(&current_user.0, Resource::User, Action::Delete)?;
    let service = UserService::new(state.db);
    service.delete_user(user_id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}
