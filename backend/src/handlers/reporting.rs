//! HTTP handlers for report and dashboard endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::{require, CurrentUser};
use crate::services::reporting::{
    DashboardSummary, GenerateReportInput, GenerateReportResponse, ReportingService,
};
use crate::AppState;
use crate::models::{Action, Report, Resource};

/// List reports generated by the logged-in user
pub async fn list_reports(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Report>>> {
    let service = ReportingService::new(state.db, &state.config);
    let reports = service.list_reports(current_user.0.user_id).await?;
    Ok(Json(reports))
}

/// Generate a report file for later download
pub async fn generate_report(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<GenerateReportInput>,
) -> AppResult<Json<GenerateReportResponse>> {
    require(&current_user.0, Resource::Report, Action::Create)?;
    let service = ReportingService::new(state.db, &state.config);
    let response = service
        .generate_report(current_user.0.user_id, input)
        .await?;
    Ok(Json(response))
}

/// Get dashboard summary counters
pub async fn get_dashboard_summary(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<DashboardSummary>> {
    let service = ReportingService::new(state.db, &state.config);
    let summary = service.dashboard_summary().await?;
    Ok(Json(summary))
}
