use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::middleware::i18n::Locale;

// Erros da aplicação. Os de ingestão só acontecem na carga inicial (o serviço
// nem sobe); os de consulta chegam aos handlers e viram `ApiError`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Falha ao abrir '{file}': {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Erro de leitura em '{file}': {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    // Fronteira de confiança: registro malformado derruba a carga inteira.
    #[error("Registro inválido em '{file}', linha {row}: {source}")]
    InvalidRecord {
        file: String,
        row: usize,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("Parâmetro de consulta inválido: {0}")]
    InvalidQuery(String),

    #[error("Produto não encontrado: {0}")]
    ProductNotFound(String),

    #[error("Cliente não encontrado: {0}")]
    CustomerNotFound(String),

    #[error("Vendedor não encontrado: {0}")]
    SellerNotFound(String),

    #[error("Estouro na soma dos totais")]
    TotalOverflow,

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// O erro que de fato vai para o cliente HTTP, já traduzido.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let pt = locale.is_portuguese();

        let (status, message) = match self {
            AppError::InvalidQuery(detail) => (
                StatusCode::BAD_REQUEST,
                if pt {
                    format!("Parâmetros de consulta inválidos: {detail}")
                } else {
                    format!("Invalid query parameters: {detail}")
                },
            ),
            AppError::ProductNotFound(id) => (
                StatusCode::NOT_FOUND,
                if pt {
                    format!("Produto '{id}' não encontrado.")
                } else {
                    format!("Product '{id}' not found.")
                },
            ),
            AppError::CustomerNotFound(id) => (
                StatusCode::NOT_FOUND,
                if pt {
                    format!("Cliente '{id}' não encontrado.")
                } else {
                    format!("Customer '{id}' not found.")
                },
            ),
            AppError::SellerNotFound(id) => (
                StatusCode::NOT_FOUND,
                if pt {
                    format!("Vendedor '{id}' não encontrado.")
                } else {
                    format!("Seller '{id}' not found.")
                },
            ),

            // Todo o resto vira 500; o detalhe fica só no log.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    if pt {
                        "Ocorreu um erro inesperado.".to_string()
                    } else {
                        "An unexpected error occurred.".to_string()
                    },
                )
            }
        };

        ApiError { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_localized() {
        let err = AppError::ProductNotFound("P9".to_string());

        let pt = err.to_api_error(&Locale("pt".to_string()));
        assert_eq!(pt.status, StatusCode::NOT_FOUND);
        assert_eq!(pt.message, "Produto 'P9' não encontrado.");

        let en = err.to_api_error(&Locale("en".to_string()));
        assert_eq!(en.message, "Product 'P9' not found.");
    }

    #[test]
    fn internal_errors_hide_details() {
        let api = AppError::TotalOverflow.to_api_error(&Locale("en".to_string()));

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "An unexpected error occurred.");
    }
}
