// src/models/inventory.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// --- Categorias ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// --- Materiais ---
// O saldo (quantity) só muda através do livro de movimentações
// (LedgerService); nenhuma outra escrita toca nessa coluna.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: i32,
    pub name: String,
    pub unit: String,
    pub quantity: i32,
    pub min_quantity: i32,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

// Linha da listagem de materiais, já com o nome da categoria resolvido.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MaterialWithCategory {
    pub id: i32,
    pub name: String,
    pub unit: String,
    pub quantity: i32,
    pub min_quantity: i32,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- Movimentações de Estoque ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_type", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum TransactionType {
    Increase, // Vira "INCREASE"
    Decrease, // Vira "DECREASE"
}

// Registro imutável de uma movimentação: nunca é atualizado, e só é
// removido junto com o material a que pertence.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockTransaction {
    pub id: i32,
    pub material_id: i32,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: i32,
    pub comment: Option<String>,
    pub operation_date: DateTime<Utc>,
}

// Linha do histórico de movimentações, com o nome do material resolvido.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TransactionWithMaterial {
    pub id: i32,
    pub material_id: i32,
    pub material_name: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: i32,
    pub comment: Option<String>,
    pub operation_date: DateTime<Utc>,
}
