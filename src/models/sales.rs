// src/models/sales.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

// --- Tabela Fato ---

// Uma linha de vendas.csv, já validada pela fronteira de ingestão.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub sale_id: String,
    pub seller_id: String,
    pub product_id: String,
    pub customer_id: String,
    pub date: NaiveDate,
    pub total: Decimal,
}

// --- Tabelas Dimensão ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_id: String,
    pub name: String,
    pub state: String, // Sigla da UF (ex: "SP")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub seller_id: String,
    pub name: String,
}

// Fornecedores não entram em nenhum relatório, só são repassados ao catálogo.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub supplier_id: String,
    pub name: String,
}

/// Uma tabela dimensão: tem uma coluna identificadora usada nos joins.
pub trait Dimension {
    fn key(&self) -> &str;
}

impl Dimension for Product {
    fn key(&self) -> &str {
        &self.product_id
    }
}

impl Dimension for Customer {
    fn key(&self) -> &str {
        &self.customer_id
    }
}

impl Dimension for Seller {
    fn key(&self) -> &str {
        &self.seller_id
    }
}

impl Dimension for Supplier {
    fn key(&self) -> &str {
        &self.supplier_id
    }
}
