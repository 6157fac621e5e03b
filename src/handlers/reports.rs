// src/handlers/reports.rs

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    engine::filter::DateRange,
    middleware::i18n::Locale,
};

// ?start=2024-01-01&end=2024-12-31 (as duas pontas são opcionais)
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

type RangeParams = Result<Query<DateRangeQuery>, QueryRejection>;

fn date_range(params: RangeParams) -> Result<DateRange, AppError> {
    let Query(query) = params.map_err(|rejection| AppError::InvalidQuery(rejection.body_text()))?;
    Ok(DateRange::new(query.start, query.end))
}

// Filtro -> relatório -> JSON. A resposta é montada aqui dentro porque o
// relatório pode emprestar linhas da sessão.
fn respond<T, F>(locale: &Locale, params: RangeParams, build: F) -> Result<Response, ApiError>
where
    T: serde::Serialize,
    F: FnOnce(&DateRange) -> Result<T, AppError>,
{
    let range = date_range(params).map_err(|e| e.to_api_error(locale))?;
    let report = build(&range).map_err(|e| e.to_api_error(locale))?;

    Ok((StatusCode::OK, Json(report)).into_response())
}

// GET /api/sales
pub async fn get_sales(
    State(app_state): State<AppState>,
    locale: Locale,
    params: RangeParams,
) -> Result<Response, ApiError> {
    respond(&locale, params, |range| {
        Ok(app_state.report_service.filtered_sales(range))
    })
}

// GET /api/reports/by-seller
pub async fn get_sales_by_seller(
    State(app_state): State<AppState>,
    locale: Locale,
    params: RangeParams,
) -> Result<Response, ApiError> {
    respond(&locale, params, |range| {
        app_state.report_service.get_sales_by_seller(range)
    })
}

// GET /api/reports/by-product
pub async fn get_sales_by_product(
    State(app_state): State<AppState>,
    locale: Locale,
    params: RangeParams,
) -> Result<Response, ApiError> {
    respond(&locale, params, |range| {
        app_state.report_service.get_sales_by_product(range)
    })
}

// GET /api/reports/by-category
pub async fn get_sales_by_category(
    State(app_state): State<AppState>,
    locale: Locale,
    params: RangeParams,
) -> Result<Response, ApiError> {
    respond(&locale, params, |range| {
        app_state.report_service.get_sales_by_category(range)
    })
}

// GET /api/reports/by-month
pub async fn get_sales_by_month(
    State(app_state): State<AppState>,
    locale: Locale,
    params: RangeParams,
) -> Result<Response, ApiError> {
    respond(&locale, params, |range| {
        app_state.report_service.get_sales_by_month(range)
    })
}

// GET /api/reports/by-state
pub async fn get_sales_by_state(
    State(app_state): State<AppState>,
    locale: Locale,
    params: RangeParams,
) -> Result<Response, ApiError> {
    respond(&locale, params, |range| {
        app_state.report_service.get_sales_by_state(range)
    })
}

// GET /api/reports/state-month
pub async fn get_sales_by_state_month(
    State(app_state): State<AppState>,
    locale: Locale,
    params: RangeParams,
) -> Result<Response, ApiError> {
    respond(&locale, params, |range| {
        app_state.report_service.get_sales_by_state_month(range)
    })
}

// GET /api/reports/overview
pub async fn get_overview(
    State(app_state): State<AppState>,
    locale: Locale,
    params: RangeParams,
) -> Result<Response, ApiError> {
    respond(&locale, params, |range| {
        app_state.report_service.get_overview(range)
    })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{
        config::AppState,
        db::SalesSession,
        models::sales::{Customer, Product, Sale, Seller},
    };

    fn state() -> AppState {
        let sale = |id: &str, product: &str, day: u32, month: u32, total: i64| Sale {
            sale_id: id.to_string(),
            seller_id: "S1".to_string(),
            product_id: product.to_string(),
            customer_id: "C1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
            total: Decimal::from(total),
        };

        AppState::from_session(SalesSession::new(
            vec![sale("1", "P1", 5, 1, 100), sale("2", "P2", 10, 2, 50)],
            vec![
                Product { product_id: "P1".to_string(), name: "Caneta".to_string(), category: "Papelaria".to_string() },
                Product { product_id: "P2".to_string(), name: "Mouse".to_string(), category: "Informática".to_string() },
            ],
            vec![Customer { customer_id: "C1".to_string(), name: "Maria".to_string(), state: "MG".to_string() }],
            vec![Seller { seller_id: "S1".to_string(), name: "Ana".to_string() }],
            Vec::new(),
        ))
    }

    async fn get(uri: &str, lang: &str) -> (StatusCode, Value) {
        let response = crate::app(state())
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::ACCEPT_LANGUAGE, lang)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn by_seller_route() {
        let (status, body) = get("/api/reports/by-seller", "pt-BR").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{ "sellerName": "Ana", "total": 150.0 }]));
    }

    #[tokio::test]
    async fn by_month_route_with_range() {
        let (status, body) = get("/api/reports/by-month?start=2024-02-01&end=2024-02-29", "pt").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{ "month": "2024-02-01", "total": 50.0 }]));
    }

    #[tokio::test]
    async fn by_state_route_carries_state_name() {
        let (_, body) = get("/api/reports/by-state", "pt").await;

        assert_eq!(body[0]["state"], "MG");
        assert_eq!(body[0]["stateName"], "Minas Gerais");
    }

    #[tokio::test]
    async fn inverted_range_returns_empty_reports() {
        let (status, body) = get("/api/reports/overview?start=2025-01-01&end=2024-01-01", "pt").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["salesCount"], 0);
        assert_eq!(body["sales"], json!([]));
        assert_eq!(body["byCategory"], json!([]));
    }

    #[tokio::test]
    async fn open_range_on_sales_route() {
        let (status, body) = get("/api/sales?start=2024-02-01", "pt").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["saleId"], "2");
    }

    #[tokio::test]
    async fn malformed_date_is_localized_bad_request() {
        let (status, body) = get("/api/reports/by-product?start=05-01-2024", "en-US").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid query parameters"));
    }
}
