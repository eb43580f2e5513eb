// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;

use almoxarifado_backend::{config::AppState, handlers, middleware::auth::auth_guard};

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Garante que a conta administrativa padrão exista
    app_state
        .auth_service
        .ensure_admin()
        .await
        .expect("Falha ao garantir o usuário administrador.");

    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Define as rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let inventory_routes = Router::new()
        .route(
            "/categories",
            post(handlers::inventory::create_category).get(handlers::inventory::get_all_categories),
        )
        .route(
            "/categories/{id}",
            delete(handlers::inventory::delete_category),
        )
        .route(
            "/materials",
            post(handlers::inventory::create_material).get(handlers::inventory::get_all_materials),
        )
        .route(
            "/materials/{id}",
            delete(handlers::inventory::delete_material),
        )
        .route("/stock-entry", post(handlers::inventory::add_stock))
        .route("/stock-issue", post(handlers::inventory::remove_stock))
        .route(
            "/transactions",
            get(handlers::inventory::get_all_transactions),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let log_routes = Router::new()
        .route("/", get(handlers::logs::get_all_logs))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/logs", log_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
