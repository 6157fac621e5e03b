// src/handlers/catalog.rs

// Aba "Produtos e Clientes": as tabelas dimensão como foram carregadas.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{common::error::ApiError, config::AppState, middleware::i18n::Locale};

// GET /api/catalog/products
pub async fn list_products(State(app_state): State<AppState>) -> Response {
    (StatusCode::OK, Json(app_state.dataset_repo.products())).into_response()
}

// GET /api/catalog/products/{id}
pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(product_id): Path<String>,
) -> Result<Response, ApiError> {
    let product = app_state
        .dataset_repo
        .get_product(&product_id)
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(product)).into_response())
}

// GET /api/catalog/customers
pub async fn list_customers(State(app_state): State<AppState>) -> Response {
    (StatusCode::OK, Json(app_state.dataset_repo.customers())).into_response()
}

// GET /api/catalog/customers/{id}
pub async fn get_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(customer_id): Path<String>,
) -> Result<Response, ApiError> {
    let customer = app_state
        .dataset_repo
        .get_customer(&customer_id)
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(customer)).into_response())
}

// GET /api/catalog/sellers
pub async fn list_sellers(State(app_state): State<AppState>) -> Response {
    (StatusCode::OK, Json(app_state.dataset_repo.sellers())).into_response()
}

// GET /api/catalog/sellers/{id}
pub async fn get_seller(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(seller_id): Path<String>,
) -> Result<Response, ApiError> {
    let seller = app_state
        .dataset_repo
        .get_seller(&seller_id)
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(seller)).into_response())
}

// GET /api/catalog/suppliers
pub async fn list_suppliers(State(app_state): State<AppState>) -> Response {
    (StatusCode::OK, Json(app_state.dataset_repo.suppliers())).into_response()
}
