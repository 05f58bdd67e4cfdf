//! HTTP handlers for authentication endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::auth::{
    AuthService, AuthTokens, ChangePasswordInput, ForgotPasswordInput, LoginInput, LoginResponse,
    ResetPasswordInput,
};
use crate::AppState;

/// Generic message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Input for refreshing tokens
#[derive(Debug, Deserialize)]
pub struct RefreshInput {
    pub refresh_token: String,
}

/// Log in with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<LoginResponse>> {
    let service = AuthService::new(state.db, &state.config);
    let response = service.login(input).await?;
    Ok(Json(response))
}

/// Exchange a refresh token for a new token pair
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshInput>,
) -> AppResult<Json<AuthTokens>> {
    let service = AuthService::new(state.db, &state.config);
    let tokens = service.refresh_token(&input.refresh_token).await?;
    Ok(Json(tokens))
}

/// Change the password of the logged-in user
pub async fn change_password(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<ChangePasswordInput>,
) -> AppResult<Json<MessageResponse>> {
    let service = AuthService::new(state.db, &state.config);
    service.change_password(current_user.0.user_id, input).await?;
    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}

/// Request a password-reset link
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordInput>,
) -> AppResult<Json<MessageResponse>> {
    let service = AuthService::new(state.db, &state.config);
    let message = service.forgot_password(&input.email).await?;
    Ok(Json(MessageResponse { message }))
}

/// Complete a password reset using a token from the reset link
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordInput>,
) -> AppResult<Json<MessageResponse>> {
    let service = AuthService::new(state.db, &state.config);
    service.reset_password(input).await?;
    Ok(Json(MessageResponse {
        message: "Password successfully updated".to_string(),
    }))
}
