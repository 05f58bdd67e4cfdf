//! HTTP handlers for stock movement endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::{require, CurrentUser};
use crate::services::movement::{MovementRecord, MovementService, RecordMovementInput};
use crate::AppState;
use crate::models::{Action, Resource};

/// List all movements, newest first
pub async fn list_movements(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<MovementRecord>>> {
    let service = MovementService::new(state.db);
    let movements = service.list_movements().await?;
    Ok(Json(movements))
}

/// Record a stock movement
pub async fn record_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordMovementInput>,
) -> AppResult<Json<MovementRecord>> {
    require(&current_user.0, Resource::Movement, Action::Create)?;
    let service = MovementService::new(state.db);
    let movement = service.record_movement(current_user.0.user_id, input).await?;
    Ok(Json(movement))
}
