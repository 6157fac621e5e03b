// src/config.rs

use crate::{
    db::{DatasetRepository, SalesSession},
    services::ReportService,
};
use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Self {
            data_dir: PathBuf::from(data_dir),
            bind_addr,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub dataset_repo: DatasetRepository,
    pub report_service: ReportService,
}

impl AppState {
    // Carga única das planilhas; se algum registro for inválido o serviço não sobe.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let session = SalesSession::load_from_dir(&config.data_dir)?;

        tracing::info!(
            "✅ Dados carregados de '{}': {} venda(s), {} produto(s), {} cliente(s), {} vendedor(es)",
            config.data_dir.display(),
            session.sales.len(),
            session.products.len(),
            session.customers.len(),
            session.sellers.len()
        );

        Ok(Self::from_session(session))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_session(session: SalesSession) -> Self {
        let dataset_repo = DatasetRepository::new(session);
        let report_service = ReportService::new(dataset_repo.clone());

        Self {
            dataset_repo,
            report_service,
        }
    }
}
