// src/db/log_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::logs::LogEntry};

// Repositório da trilha de auditoria (tabela 'logs').
// As escritas recebem um executor para poderem participar da MESMA transação
// da operação de negócio que documentam: ou tudo é gravado, ou nada é.
#[derive(Clone)]
pub struct LogRepository {
    pool: PgPool,
}

impl LogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registra uma ação na trilha de auditoria (append-only).
    pub async fn add_log<'e, E>(
        &self,
        executor: E,
        user_id: Option<i32>,
        action: &str,
        details: Option<&str>,
    ) -> Result<LogEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, LogEntry>(
            r#"
            INSERT INTO logs (user_id, action, details)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(action)
        .bind(details)
        .fetch_one(executor)
        .await?;

        Ok(entry)
    }

    pub async fn get_all_logs<'e, E>(&self, executor: E) -> Result<Vec<LogEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entries =
            sqlx::query_as::<_, LogEntry>("SELECT * FROM logs ORDER BY id DESC")
                .fetch_all(executor)
                .await?;
        Ok(entries)
    }
}
