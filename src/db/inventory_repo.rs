// src/db/inventory_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::inventory::{
        Category, Material, MaterialWithCategory, StockTransaction, TransactionType,
        TransactionWithMaterial,
    },
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn get_all_categories<'e, E>(&self, executor: E) -> Result<Vec<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let categories =
            sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY id ASC")
                .fetch_all(executor)
                .await?;
        Ok(categories)
    }

    pub async fn get_all_materials<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<MaterialWithCategory>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let materials = sqlx::query_as::<_, MaterialWithCategory>(
            r#"
            SELECT m.id, m.name, m.unit, m.quantity, m.min_quantity,
                   m.category_id, c.name AS category_name, m.created_at
            FROM materials m
            LEFT JOIN categories c ON m.category_id = c.id
            ORDER BY m.id ASC
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(materials)
    }

    pub async fn get_all_transactions<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<TransactionWithMaterial>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let transactions = sqlx::query_as::<_, TransactionWithMaterial>(
            r#"
            SELECT t.id, t.material_id, m.name AS material_name,
                   t.type, t.amount, t.comment, t.operation_date
            FROM transactions t
            LEFT JOIN materials m ON t.material_id = m.id
            ORDER BY t.id DESC
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(transactions)
    }

    pub async fn find_material<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<Option<Material>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, Material>("SELECT * FROM materials WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(material)
    }

    pub async fn find_category<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<Option<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(category)
    }

    pub async fn count_materials_in_category<'e, E>(
        &self,
        executor: E,
        category_id: i32,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM materials WHERE category_id = $1")
                .bind(category_id)
                .fetch_one(executor)
                .await?;
        Ok(count)
    }

    // ---
    // Funções de "Escrita" (Transacionais)
    // ---
    // Estas usam o padrão genérico 'Executor' para rodar dentro de uma transação.

    /// Cria uma nova categoria.
    pub async fn create_category<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(executor)
        .await?;
        Ok(category)
    }

    /// Cria um material com o seu saldo inicial. O estoque inicial NÃO gera
    /// movimentação no livro: só entradas e saídas posteriores geram.
    pub async fn create_material<'e, E>(
        &self,
        executor: E,
        name: &str,
        unit: &str,
        quantity: i32,
        min_quantity: i32,
        category_id: Option<i32>,
    ) -> Result<Material, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Material>(
            r#"
            INSERT INTO materials (name, unit, quantity, min_quantity, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(unit)
        .bind(quantity)
        .bind(min_quantity)
        .bind(category_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Uma categoria inexistente aparece como violação de chave estrangeira
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::CategoryNotFound;
                }
            }
            e.into()
        })
    }

    /// Soma 'amount' ao saldo do material. Retorna None quando o id não
    /// existe (o UPDATE não afeta nenhuma linha), nunca um sucesso silencioso.
    pub async fn increase_quantity<'e, E>(
        &self,
        executor: E,
        material_id: i32,
        amount: i32,
    ) -> Result<Option<Material>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, Material>(
            r#"
            UPDATE materials
            SET quantity = quantity + $1
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(amount)
        .bind(material_id)
        .fetch_optional(executor)
        .await?;
        Ok(material)
    }

    /// Baixa condicional e atômica: o saldo só é debitado se for suficiente,
    /// na mesma instrução. Duas saídas concorrentes nunca deixam o saldo
    /// negativo, porque a segunda reavalia o WHERE depois que a primeira comita.
    /// Retorna None quando o material não existe OU o saldo não basta;
    /// quem chama decide qual dos dois casos ocorreu.
    pub async fn decrease_quantity<'e, E>(
        &self,
        executor: E,
        material_id: i32,
        amount: i32,
    ) -> Result<Option<Material>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, Material>(
            r#"
            UPDATE materials
            SET quantity = quantity - $1
            WHERE id = $2 AND quantity >= $1
            RETURNING *
            "#,
        )
        .bind(amount)
        .bind(material_id)
        .fetch_optional(executor)
        .await?;
        Ok(material)
    }

    /// Registra uma movimentação no livro (entrada ou saída).
    pub async fn record_transaction<'e, E>(
        &self,
        executor: E,
        material_id: i32,
        kind: TransactionType,
        amount: i32,
        comment: Option<&str>,
    ) -> Result<StockTransaction, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let transaction = sqlx::query_as::<_, StockTransaction>(
            r#"
            INSERT INTO transactions (material_id, type, amount, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(material_id)
        .bind(kind)
        .bind(amount)
        .bind(comment)
        .fetch_one(executor)
        .await?;
        Ok(transaction)
    }

    /// Apaga as movimentações de um material (passo anterior à exclusão dele).
    pub async fn delete_material_transactions<'e, E>(
        &self,
        executor: E,
        material_id: i32,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM transactions WHERE material_id = $1")
            .bind(material_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_material<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_category<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
