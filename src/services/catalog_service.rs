// src/services/catalog_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{InventoryRepository, LogRepository},
    models::inventory::{Category, Material, MaterialWithCategory},
};

#[derive(Clone)]
pub struct CatalogService {
    inventory_repo: InventoryRepository,
    log_repo: LogRepository,
    pool: PgPool,
}

impl CatalogService {
    pub fn new(
        inventory_repo: InventoryRepository,
        log_repo: LogRepository,
        pool: PgPool,
    ) -> Self {
        Self { inventory_repo, log_repo, pool }
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::EmptyName);
        }
        self.inventory_repo.create_category(&self.pool, name).await
    }

    // --- CADASTRO DE MATERIAL ---
    // O estoque inicial entra junto com o cadastro e não gera movimentação
    // no livro; só o registro de auditoria acompanha a criação.
    pub async fn create_material(
        &self,
        actor_id: i32,
        name: &str,
        unit: &str,
        quantity: i32,
        min_quantity: i32,
        category_id: Option<i32>,
    ) -> Result<Material, AppError> {
        if name.trim().is_empty() || unit.trim().is_empty() {
            return Err(AppError::EmptyName);
        }

        let mut tx = self.pool.begin().await?;

        let material = self
            .inventory_repo
            .create_material(&mut *tx, name, unit, quantity, min_quantity, category_id)
            .await?;

        let details = format!("{}, quantidade={}", name, quantity);
        self.log_repo
            .add_log(&mut *tx, Some(actor_id), "Cadastro de material", Some(&details))
            .await?;

        tx.commit().await?;
        Ok(material)
    }

    // --- EXCLUSÃO DE MATERIAL ---
    pub async fn delete_material(&self, actor_id: i32, id: i32) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let material = self
            .inventory_repo
            .find_material(&mut *tx, id)
            .await?
            .ok_or(AppError::MaterialNotFound)?;

        // 1. Primeiro as movimentações, para não deixar registros órfãos
        self.inventory_repo
            .delete_material_transactions(&mut *tx, id)
            .await?;

        // 2. Depois o material em si
        self.inventory_repo.delete_material(&mut *tx, id).await?;

        // 3. Auditoria
        let details = format!("{} (ID={})", material.name, id);
        self.log_repo
            .add_log(&mut *tx, Some(actor_id), "Exclusão de material", Some(&details))
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // --- EXCLUSÃO DE CATEGORIA ---
    pub async fn delete_category(&self, actor_id: i32, id: i32) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        // Uma categoria com materiais não pode ser excluída
        let count = self
            .inventory_repo
            .count_materials_in_category(&mut *tx, id)
            .await?;
        if count > 0 {
            return Err(AppError::CategoryNotEmpty);
        }

        let category = self
            .inventory_repo
            .find_category(&mut *tx, id)
            .await?
            .ok_or(AppError::CategoryNotFound)?;

        self.inventory_repo.delete_category(&mut *tx, id).await?;

        self.log_repo
            .add_log(&mut *tx, Some(actor_id), "Exclusão de categoria", Some(&category.name))
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn get_all_categories(&self) -> Result<Vec<Category>, AppError> {
        self.inventory_repo.get_all_categories(&self.pool).await
    }

    pub async fn get_all_materials(&self) -> Result<Vec<MaterialWithCategory>, AppError> {
        self.inventory_repo.get_all_materials(&self.pool).await
    }
}
