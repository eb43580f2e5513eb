//! Testes de integração de autenticação e da conta administrativa padrão.

mod common;

use almoxarifado_backend::common::error::AppError;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn registro_e_login_devolvem_tokens_validos(pool: PgPool) {
    let state = common::app_state(pool.clone());

    let token = state
        .auth_service
        .register_user("maria", "senha-forte")
        .await
        .unwrap();

    // O token do registro já identifica o usuário
    let user = state.auth_service.validate_token(&token).await.unwrap();
    assert_eq!(user.username, "maria");
    assert_eq!(user.role, "user");

    let token = state
        .auth_service
        .login_user("maria", "senha-forte")
        .await
        .unwrap();
    let user = state.auth_service.validate_token(&token).await.unwrap();
    assert_eq!(user.username, "maria");
}

#[sqlx::test(migrations = "./migrations")]
async fn nome_de_usuario_duplicado_e_rejeitado(pool: PgPool) {
    let state = common::app_state(pool.clone());

    state
        .auth_service
        .register_user("maria", "senha-forte")
        .await
        .unwrap();

    let result = state.auth_service.register_user("maria", "outra-senha").await;
    assert!(matches!(result, Err(AppError::UsernameAlreadyExists)));
}

#[sqlx::test(migrations = "./migrations")]
async fn senha_errada_e_usuario_desconhecido_falham_igual(pool: PgPool) {
    let state = common::app_state(pool.clone());

    state
        .auth_service
        .register_user("maria", "senha-forte")
        .await
        .unwrap();

    let result = state.auth_service.login_user("maria", "senha-errada").await;
    assert!(matches!(result, Err(AppError::InvalidCredentials)));

    let result = state.auth_service.login_user("jose", "senha-forte").await;
    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

#[sqlx::test(migrations = "./migrations")]
async fn token_adulterado_e_rejeitado(pool: PgPool) {
    let state = common::app_state(pool.clone());

    let result = state.auth_service.validate_token("um.token.qualquer").await;
    assert!(matches!(result, Err(AppError::InvalidToken)));
}

#[sqlx::test(migrations = "./migrations")]
async fn ensure_admin_e_idempotente(pool: PgPool) {
    let state = common::app_state(pool.clone());

    let first = state.auth_service.ensure_admin().await.unwrap();
    assert_eq!(first.username, "admin");
    assert_eq!(first.role, "admin");

    // Uma segunda chamada reutiliza a conta existente
    let second = state.auth_service.ensure_admin().await.unwrap();
    assert_eq!(second.id, first.id);

    let admins: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = 'admin'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(admins, 1);
}
