// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginUserPayload, RegisterUserPayload},
};

pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .register_user(&payload.username, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .login_user(&payload.username, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(AuthResponse { token })))
}

// O usuário autenticado vem direto do extrator
pub async fn get_me(user: AuthenticatedUser) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(user.0)))
}
