//src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;
mod views;

use crate::config::{AppState, Settings};

// Monta todas as rotas sobre o estado já pronto
fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/", get(handlers::inventory::list_items))
        .route(
            "/add",
            get(handlers::inventory::new_item_form).post(handlers::inventory::create_item),
        )
        .route(
            "/edit/{id}",
            get(handlers::inventory::edit_item_form).post(handlers::inventory::update_item),
        )
        .route("/delete/{id}", post(handlers::inventory::delete_item))
        .route("/consume/{id}", post(handlers::inventory::consume_item))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger (RUST_LOG, padrão "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração ou o banco falharem, a aplicação não deve iniciar.
    let settings = Settings::from_env()?;
    let app_state = AppState::new(&settings).await?;

    let app = router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
