//! Testes de integração do livro de movimentações.
//!
//! Exercita o LedgerService contra um banco real:
//! - entrada e saída atualizam o saldo e registram movimentação + auditoria
//! - saída com saldo insuficiente falha sem deixar rastro
//! - material inexistente nunca vira sucesso silencioso
//! - quantidades não positivas são rejeitadas antes de tocar no banco
//! - saídas concorrentes nunca deixam o saldo negativo

mod common;

use almoxarifado_backend::common::error::AppError;
use almoxarifado_backend::models::inventory::TransactionType;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn entrada_soma_saldo_e_registra_movimentacao(pool: PgPool) {
    let state = common::app_state(pool.clone());
    let actor = common::seed_user(&pool, "operador").await;
    let material = state
        .catalog_service
        .create_material(actor, "Parafuso", "pcs", 10, 2, None)
        .await
        .unwrap();

    let updated = state
        .ledger_service
        .increase_stock(actor, material.id, 5, None)
        .await
        .unwrap();

    assert_eq!(updated.quantity, 15);
    assert_eq!(common::material_quantity(&pool, material.id).await, 15);

    let transactions = state.ledger_service.get_all_transactions().await.unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].kind, TransactionType::Increase);
    assert_eq!(transactions[0].amount, 5);
    assert_eq!(transactions[0].material_id, material.id);

    assert_eq!(
        common::count_logs_with_action(&pool, "Entrada de estoque").await,
        1
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn entrada_seguida_de_saida_restaura_o_saldo(pool: PgPool) {
    let state = common::app_state(pool.clone());
    let actor = common::seed_user(&pool, "operador").await;
    let material = state
        .catalog_service
        .create_material(actor, "Luva", "par", 30, 5, None)
        .await
        .unwrap();

    state
        .ledger_service
        .increase_stock(actor, material.id, 12, None)
        .await
        .unwrap();
    let updated = state
        .ledger_service
        .decrease_stock(actor, material.id, 12, None)
        .await
        .unwrap();

    // O par entrada/saída devolve o saldo original...
    assert_eq!(updated.quantity, 30);

    // ...e deixa exatamente duas movimentações, na ordem em que ocorreram.
    let transactions = state.ledger_service.get_all_transactions().await.unwrap();
    assert_eq!(transactions.len(), 2);
    // A listagem vem da mais recente para a mais antiga.
    assert_eq!(transactions[0].kind, TransactionType::Decrease);
    assert_eq!(transactions[0].amount, 12);
    assert_eq!(transactions[1].kind, TransactionType::Increase);
    assert_eq!(transactions[1].amount, 12);
}

#[sqlx::test(migrations = "./migrations")]
async fn saida_com_saldo_insuficiente_nao_deixa_rastro(pool: PgPool) {
    let state = common::app_state(pool.clone());
    let actor = common::seed_user(&pool, "operador").await;
    let material = state
        .catalog_service
        .create_material(actor, "Cabo", "m", 10, 0, None)
        .await
        .unwrap();

    state
        .ledger_service
        .increase_stock(actor, material.id, 5, None)
        .await
        .unwrap();

    let transactions_before = common::count_transactions(&pool, material.id).await;
    let logs_before = common::count_logs(&pool).await;

    // Cenário: saldo 15, tentativa de saída de 20.
    let result = state
        .ledger_service
        .decrease_stock(actor, material.id, 20, None)
        .await;

    assert!(matches!(result, Err(AppError::InsufficientStock)));

    // O saldo e as tabelas ficam exatamente como estavam.
    assert_eq!(common::material_quantity(&pool, material.id).await, 15);
    assert_eq!(
        common::count_transactions(&pool, material.id).await,
        transactions_before
    );
    assert_eq!(common::count_logs(&pool).await, logs_before);
}

#[sqlx::test(migrations = "./migrations")]
async fn material_inexistente_falha_com_not_found(pool: PgPool) {
    let state = common::app_state(pool.clone());
    let actor = common::seed_user(&pool, "operador").await;

    let result = state.ledger_service.increase_stock(actor, 9999, 5, None).await;
    assert!(matches!(result, Err(AppError::MaterialNotFound)));

    let result = state.ledger_service.decrease_stock(actor, 9999, 5, None).await;
    assert!(matches!(result, Err(AppError::MaterialNotFound)));

    // Nenhuma movimentação ou log pode ter sido gravado.
    assert_eq!(common::count_logs(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn quantidade_nao_positiva_e_rejeitada(pool: PgPool) {
    let state = common::app_state(pool.clone());
    let actor = common::seed_user(&pool, "operador").await;
    let material = state
        .catalog_service
        .create_material(actor, "Fita", "rolo", 10, 0, None)
        .await
        .unwrap();

    for amount in [0, -3] {
        let result = state
            .ledger_service
            .increase_stock(actor, material.id, amount, None)
            .await;
        assert!(matches!(result, Err(AppError::InvalidQuantity)));

        let result = state
            .ledger_service
            .decrease_stock(actor, material.id, amount, None)
            .await;
        assert!(matches!(result, Err(AppError::InvalidQuantity)));
    }

    assert_eq!(common::material_quantity(&pool, material.id).await, 10);
    assert_eq!(common::count_transactions(&pool, material.id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn saidas_concorrentes_nunca_negativam_o_saldo(pool: PgPool) {
    let state = common::app_state(pool.clone());
    let actor = common::seed_user(&pool, "operador").await;
    let material = state
        .catalog_service
        .create_material(actor, "Óleo", "L", 10, 0, None)
        .await
        .unwrap();

    // Duas saídas de 7 disputando um saldo de 10: só uma cabe.
    let (first, second) = tokio::join!(
        state.ledger_service.decrease_stock(actor, material.id, 7, None),
        state.ledger_service.decrease_stock(actor, material.id, 7, None),
    );

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let failure = if first.is_err() { first } else { second };
    assert!(matches!(failure, Err(AppError::InsufficientStock)));

    assert_eq!(common::material_quantity(&pool, material.id).await, 3);
    assert_eq!(common::count_transactions(&pool, material.id).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn comentario_da_movimentacao_e_preservado(pool: PgPool) {
    let state = common::app_state(pool.clone());
    let actor = common::seed_user(&pool, "operador").await;
    let material = state
        .catalog_service
        .create_material(actor, "Solvente", "L", 0, 0, None)
        .await
        .unwrap();

    state
        .ledger_service
        .increase_stock(actor, material.id, 4, Some("Reposição mensal"))
        .await
        .unwrap();

    let transactions = state.ledger_service.get_all_transactions().await.unwrap();
    assert_eq!(transactions[0].comment.as_deref(), Some("Reposição mensal"));
    assert_eq!(
        transactions[0].material_name.as_deref(),
        Some("Solvente")
    );
}
