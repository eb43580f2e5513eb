// src/models/logs.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Entrada da trilha de auditoria. O user_id é opcional porque a referência
// é limpa (SET NULL) quando o usuário é excluído.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: i32,
    pub user_id: Option<i32>,
    pub action: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}
