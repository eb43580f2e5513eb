// src/services/ledger_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{InventoryRepository, LogRepository},
    models::inventory::{Material, TransactionType, TransactionWithMaterial},
};

// O livro de movimentações: toda mudança de saldo passa por aqui e sai com
// uma movimentação e um registro de auditoria gravados na MESMA transação.
#[derive(Clone)]
pub struct LedgerService {
    inventory_repo: InventoryRepository,
    log_repo: LogRepository,
    pool: PgPool,
}

impl LedgerService {
    pub fn new(
        inventory_repo: InventoryRepository,
        log_repo: LogRepository,
        pool: PgPool,
    ) -> Self {
        Self { inventory_repo, log_repo, pool }
    }

    // --- ENTRADA DE ESTOQUE ---
    pub async fn increase_stock(
        &self,
        actor_id: i32,
        material_id: i32,
        amount: i32,
        comment: Option<&str>,
    ) -> Result<Material, AppError> {
        if amount <= 0 {
            return Err(AppError::InvalidQuantity);
        }

        let mut tx = self.pool.begin().await?;

        // 1. Credita o saldo. Nenhuma linha afetada = material inexistente.
        let material = self
            .inventory_repo
            .increase_quantity(&mut *tx, material_id, amount)
            .await?
            .ok_or(AppError::MaterialNotFound)?;

        // 2. Registra a movimentação no livro
        self.inventory_repo
            .record_transaction(&mut *tx, material_id, TransactionType::Increase, amount, comment)
            .await?;

        // 3. Auditoria, dentro da mesma transação
        let details = format!("ID={}, quantidade={}", material_id, amount);
        self.log_repo
            .add_log(&mut *tx, Some(actor_id), "Entrada de estoque", Some(&details))
            .await?;

        tx.commit().await?;
        Ok(material)
    }

    // --- SAÍDA DE ESTOQUE ---
    pub async fn decrease_stock(
        &self,
        actor_id: i32,
        material_id: i32,
        amount: i32,
        comment: Option<&str>,
    ) -> Result<Material, AppError> {
        if amount <= 0 {
            return Err(AppError::InvalidQuantity);
        }

        let mut tx = self.pool.begin().await?;

        // 1. Baixa condicional: o WHERE já garante saldo suficiente, sem
        //    ler-e-depois-escrever.
        let updated = self
            .inventory_repo
            .decrease_quantity(&mut *tx, material_id, amount)
            .await?;

        let material = match updated {
            Some(material) => material,
            None => {
                // Nenhuma linha afetada: falta o material ou falta saldo.
                return match self.inventory_repo.find_material(&mut *tx, material_id).await? {
                    Some(_) => Err(AppError::InsufficientStock),
                    None => Err(AppError::MaterialNotFound),
                };
            }
        };

        // 2. Registra a movimentação no livro
        self.inventory_repo
            .record_transaction(&mut *tx, material_id, TransactionType::Decrease, amount, comment)
            .await?;

        // 3. Auditoria, dentro da mesma transação
        let details = format!("ID={}, quantidade={}", material_id, amount);
        self.log_repo
            .add_log(&mut *tx, Some(actor_id), "Saída de estoque", Some(&details))
            .await?;

        tx.commit().await?;
        Ok(material)
    }

    pub async fn get_all_transactions(&self) -> Result<Vec<TransactionWithMaterial>, AppError> {
        self.inventory_repo.get_all_transactions(&self.pool).await
    }
}
