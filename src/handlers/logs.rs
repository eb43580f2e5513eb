// src/handlers/logs.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser};

pub async fn get_all_logs(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.log_repo.get_all_logs(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(entries)))
}
