//! HTTP handlers for quotation endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{require, CurrentUser};
use crate::services::quotation::{
    CreateQuotationInput, QuotationExportResponse, QuotationRecord, QuotationService,
};
use crate::AppState;
use crate::models::{Action, Resource};

/// List quotations (admin: all, user: own), newest first
pub async fn list_quotations(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<QuotationRecord>>> {
    let service = QuotationService::new(state.db, &state.config);
    let quotations = service
        .list_quotations(current_user.0.user_id, current_user.0.role)
        .await?;
    Ok(Json(quotations))
}

/// Create a quotation
pub async fn create_quotation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateQuotationInput>,
) -> AppResult<Json<QuotationRecord>> {
    require(&current_user.0, Resource::Quotation, Action::Create)?;
    let service = QuotationService::new(state.db, &state.config);
    let quotation = service
        .create_quotation(current_user.0.user_id, input)
        .await?;
    Ok(Json(quotation))
}

/// Get a quotation by id
pub async fn get_quotation(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(quotation_id): Path<Uuid>,
) -> AppResult<Json<QuotationRecord>> {
    let service = QuotationService::new(state.db, &state.config);
    let quotation = service.get_quotation(quotation_id).await?;
    Ok(Json(quotation))
}

/// Export a quotation as a downloadable document
pub async fn export_quotation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(quotation_id): Path<Uuid>,
) -> AppResult<Json<QuotationExportResponse>> {
    require(&current_user.0, Resource::Quotation, Action::Export)?;
    let service = QuotationService::new(state.db, &state.config);
    let response = service
        .export_quotation(current_user.0.user_id, quotation_id)
        .await?;
    Ok(Json(response))
}
