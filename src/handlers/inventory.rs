// src/handlers/inventory.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
};

// ---
// Payload: CreateCategory
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
}

pub async fn create_category(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .catalog_service
        .create_category(&payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn get_all_categories(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.catalog_service.get_all_categories().await?;
    Ok((StatusCode::OK, Json(categories)))
}

pub async fn delete_category(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .catalog_service
        .delete_category(user.0.id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Payload: CreateMaterial
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    pub unit: String,

    // Estoque inicial do material; se o JSON não tiver esse campo, assume 0
    #[validate(range(min = 0, message = "A quantidade inicial não pode ser negativa."))]
    #[serde(default)]
    pub quantity: i32,

    #[validate(range(min = 0, message = "O estoque mínimo não pode ser negativo."))]
    #[serde(default)]
    pub min_quantity: i32,

    pub category_id: Option<i32>,
}

pub async fn create_material(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateMaterialPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let material = app_state
        .catalog_service
        .create_material(
            user.0.id,
            &payload.name,
            &payload.unit,
            payload.quantity,
            payload.min_quantity,
            payload.category_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(material)))
}

pub async fn get_all_materials(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let materials = app_state.catalog_service.get_all_materials().await?;
    Ok((StatusCode::OK, Json(materials)))
}

pub async fn delete_material(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .catalog_service
        .delete_material(user.0.id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Payload: Movimentação de estoque (entrada e saída usam a mesma forma)
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementPayload {
    pub material_id: i32,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub amount: i32,

    pub comment: Option<String>,
}

// ---
// Handler: add_stock (ENTRADA)
// ---
pub async fn add_stock(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<StockMovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let material = app_state
        .ledger_service
        .increase_stock(
            user.0.id,
            payload.material_id,
            payload.amount,
            payload.comment.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(material)))
}

// ---
// Handler: remove_stock (SAÍDA)
// ---
pub async fn remove_stock(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<StockMovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let material = app_state
        .ledger_service
        .decrease_stock(
            user.0.id,
            payload.material_id,
            payload.amount,
            payload.comment.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(material)))
}

pub async fn get_all_transactions(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let transactions = app_state.ledger_service.get_all_transactions().await?;
    Ok((StatusCode::OK, Json(transactions)))
}
