//! HTTP handlers for stock alert endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::auth::MessageResponse;
use crate::middleware::{require, CurrentUser};
use crate::services::alert::{AlertRecord, AlertService};
use crate::AppState;
use crate::models::{Action, Resource};

/// List active alerts, newest first
pub async fn list_alerts(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<AlertRecord>>> {
    let service = AlertService::new(state.db);
    let alerts = service.list_alerts().await?;
    Ok(Json(alerts))
}

/// Dismiss an active alert
pub async fn dismiss_alert(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(alert_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    require(&current_user.0, Resource::Alert, Action::Dismiss)?;
    let service = AlertService::new(state.db);
    service.dismiss_alert(alert_id).await?;
    Ok(Json(MessageResponse {
        message: "Alert successfully dismissed".to_string(),
    }))
}
