// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{InventoryRepository, LogRepository, UserRepository},
    services::{auth::AuthService, catalog_service::CatalogService, ledger_service::LedgerService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub ledger_service: LedgerService,
    pub log_repo: LogRepository,
}

impl AppState {
    // Carrega as configurações do ambiente e cria o AppState
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, jwt_secret))
    }

    // Monta o gráfico de dependências a partir de uma pool já criada
    pub fn from_pool(db_pool: PgPool, jwt_secret: String) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let log_repo = LogRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret);
        let catalog_service =
            CatalogService::new(inventory_repo.clone(), log_repo.clone(), db_pool.clone());
        let ledger_service =
            LedgerService::new(inventory_repo, log_repo.clone(), db_pool.clone());

        Self {
            db_pool,
            auth_service,
            catalog_service,
            ledger_service,
            log_repo,
        }
    }
}
