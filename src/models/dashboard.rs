// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::sales::Sale;

// 1. Vendas por Vendedor (barras horizontais)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerTotal {
    pub seller_name: String,
    pub total: Decimal,
}

// 2. Vendas por Produto
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTotal {
    pub product_name: String,
    pub total: Decimal,
}

// 3. Distribuição por Categoria (pizza)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

// 4. Evolução Mensal (linha). `month` é sempre o dia 1 do mês.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthTotal {
    pub month: NaiveDate,
    pub total: Decimal,
}

// 5. Vendas por Estado do Cliente (barras + mapa)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTotal {
    pub state: String,
    pub state_name: String,
    pub total: Decimal,
}

// Tabela cruzada Estado x Mês
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateMonthTotal {
    pub state: String,
    pub state_name: String,
    pub month: NaiveDate,
    pub total: Decimal,
}

// Aba "Vendas" inteira de uma vez: tabela filtrada + os cinco gráficos.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview<'a> {
    pub sales_count: usize,
    pub sales_total: Decimal,
    pub sales: Vec<&'a Sale>,
    pub by_seller: Vec<SellerTotal>,
    pub by_product: Vec<ProductTotal>,
    pub by_category: Vec<CategoryTotal>,
    pub by_month: Vec<MonthTotal>,
    pub by_state: Vec<StateTotal>,
}
