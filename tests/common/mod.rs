//! Apoio compartilhado pelos testes de integração.

use almoxarifado_backend::config::AppState;
use sqlx::PgPool;

pub fn app_state(pool: PgPool) -> AppState {
    AppState::from_pool(pool, "segredo-de-teste".to_string())
}

// Cria um usuário direto na tabela; os testes de catálogo e do livro não
// precisam de um hash bcrypt de verdade.
#[allow(dead_code)]
pub async fn seed_user(pool: &PgPool, username: &str) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO users (username, password_hash, role) VALUES ($1, 'hash-de-teste', 'user') RETURNING id",
    )
    .bind(username)
    .fetch_one(pool)
    .await
    .expect("falha ao criar usuário de teste")
}

#[allow(dead_code)]
pub async fn material_quantity(pool: &PgPool, id: i32) -> i32 {
    sqlx::query_scalar("SELECT quantity FROM materials WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("material deveria existir")
}

#[allow(dead_code)]
pub async fn count_transactions(pool: &PgPool, material_id: i32) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE material_id = $1")
        .bind(material_id)
        .fetch_one(pool)
        .await
        .expect("falha ao contar movimentações")
}

#[allow(dead_code)]
pub async fn count_logs(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM logs")
        .fetch_one(pool)
        .await
        .expect("falha ao contar logs")
}

#[allow(dead_code)]
pub async fn count_logs_with_action(pool: &PgPool, action: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM logs WHERE action = $1")
        .bind(action)
        .fetch_one(pool)
        .await
        .expect("falha ao contar logs")
}
