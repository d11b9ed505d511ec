//! HTTP handlers for authentication endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::auth::{AuthService, LoginInput, LoginResponse, RegisterUserInput};
use crate::AppState;
use shared::models::User;

/// Register a back-office user (admin only)
pub async fn register(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RegisterUserInput>,
) -> AppResult<Json<User>> {
    current_user.0.require_admin()?;
    let service = AuthService::new(state.db, &state.config);
    let user = service.register(input).await?;
    Ok(Json(user))
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

/// Current user's profile
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<User>> {
    let service = AuthService::new(state.db, &state.config);
    let user = service.me(current_user.0.user_id).await?;
    Ok(Json(user))
}
