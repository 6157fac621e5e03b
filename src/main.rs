//src/main.rs

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod db;
mod engine;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppConfig, AppState};

fn app(app_state: AppState) -> Router {
    // Relatórios agregados (todos aceitam ?start=&end=)
    let report_routes = Router::new()
        .route("/by-seller", get(handlers::reports::get_sales_by_seller))
        .route("/by-product", get(handlers::reports::get_sales_by_product))
        .route("/by-category", get(handlers::reports::get_sales_by_category))
        .route("/by-month", get(handlers::reports::get_sales_by_month))
        .route("/by-state", get(handlers::reports::get_sales_by_state))
        .route("/state-month", get(handlers::reports::get_sales_by_state_month))
        .route("/overview", get(handlers::reports::get_overview));

    // Tabelas dimensão
    let catalog_routes = Router::new()
        .route("/products", get(handlers::catalog::list_products))
        .route("/products/{id}", get(handlers::catalog::get_product))
        .route("/customers", get(handlers::catalog::list_customers))
        .route("/customers/{id}", get(handlers::catalog::get_customer))
        .route("/sellers", get(handlers::catalog::list_sellers))
        .route("/sellers/{id}", get(handlers::catalog::get_seller))
        .route("/suppliers", get(handlers::catalog::list_suppliers));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/sales", get(handlers::reports::get_sales))
        .nest("/api/reports", report_routes)
        .nest("/api/catalog", catalog_routes)
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Lê o .env antes do logger, para que RUST_LOG de lá valha.
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a carga falhar, a aplicação não deve iniciar.
    let app_state = AppState::new(&config)?;

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app(app_state)).await?;
    Ok(())
}
