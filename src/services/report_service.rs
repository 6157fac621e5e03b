// src/services/report_service.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::DatasetRepository,
    engine::{
        aggregate::{aggregate, month_start, sort_summary, SortOrder},
        filter::{filter_sales, DateRange},
        join::{inner_join, DimensionTable},
    },
    models::{
        brazil::state_name,
        dashboard::{
            CategoryTotal, DashboardOverview, MonthTotal, ProductTotal, SellerTotal,
            StateMonthTotal, StateTotal,
        },
        sales::{Customer, Product, Sale, Seller},
    },
};

// ---
// Relatórios puros: (vendas já filtradas, dimensão) -> tabela resumo.
// ---

// Ordem: crescente por total.
pub fn sales_by_seller(
    sales: &[&Sale],
    sellers: &DimensionTable<Seller>,
) -> Result<Vec<SellerTotal>, AppError> {
    let joined = inner_join(sales.iter().copied(), sellers, |s: &Sale| s.seller_id.as_str());
    let mut summary = aggregate(joined, |row| row.dim.name.clone(), |row| row.fact.total)?;
    sort_summary(&mut summary, SortOrder::TotalAscending);

    Ok(summary
        .into_iter()
        .map(|s| SellerTotal {
            seller_name: s.key,
            total: s.total,
        })
        .collect())
}

// Ordem: decrescente por total.
pub fn sales_by_product(
    sales: &[&Sale],
    products: &DimensionTable<Product>,
) -> Result<Vec<ProductTotal>, AppError> {
    let joined = inner_join(sales.iter().copied(), products, |s: &Sale| s.product_id.as_str());
    let mut summary = aggregate(joined, |row| row.dim.name.clone(), |row| row.fact.total)?;
    sort_summary(&mut summary, SortOrder::TotalDescending);

    Ok(summary
        .into_iter()
        .map(|s| ProductTotal {
            product_name: s.key,
            total: s.total,
        })
        .collect())
}

// Ordem: nome da categoria (quem desenha a pizza decide o resto).
pub fn sales_by_category(
    sales: &[&Sale],
    products: &DimensionTable<Product>,
) -> Result<Vec<CategoryTotal>, AppError> {
    let joined = inner_join(sales.iter().copied(), products, |s: &Sale| s.product_id.as_str());
    let mut summary = aggregate(joined, |row| row.dim.category.clone(), |row| row.fact.total)?;
    sort_summary(&mut summary, SortOrder::Key);

    Ok(summary
        .into_iter()
        .map(|s| CategoryTotal {
            category: s.key,
            total: s.total,
        })
        .collect())
}

// Sem join. Ordem cronológica.
pub fn sales_by_month(sales: &[&Sale]) -> Result<Vec<MonthTotal>, AppError> {
    let mut summary = aggregate(sales.iter().copied(), |s| month_start(s.date), |s| s.total)?;
    sort_summary(&mut summary, SortOrder::Key);

    Ok(summary
        .into_iter()
        .map(|s| MonthTotal {
            month: s.key,
            total: s.total,
        })
        .collect())
}

// Ordem: decrescente por total.
pub fn sales_by_state(
    sales: &[&Sale],
    customers: &DimensionTable<Customer>,
) -> Result<Vec<StateTotal>, AppError> {
    let joined = inner_join(sales.iter().copied(), customers, |s: &Sale| s.customer_id.as_str());
    let mut summary = aggregate(joined, |row| row.dim.state.clone(), |row| row.fact.total)?;
    sort_summary(&mut summary, SortOrder::TotalDescending);

    Ok(summary
        .into_iter()
        .map(|s| StateTotal {
            state_name: state_name(&s.key).to_string(),
            state: s.key,
            total: s.total,
        })
        .collect())
}

// Tabela cruzada. Ordem: UF, depois mês.
pub fn sales_by_state_month(
    sales: &[&Sale],
    customers: &DimensionTable<Customer>,
) -> Result<Vec<StateMonthTotal>, AppError> {
    let joined = inner_join(sales.iter().copied(), customers, |s: &Sale| s.customer_id.as_str());
    let summary = aggregate(
        joined,
        |row| (row.dim.state.clone(), month_start(row.fact.date)),
        |row| row.fact.total,
    )?;

    Ok(summary
        .into_iter()
        .map(|s| {
            let (state, month) = s.key;
            StateMonthTotal {
                state_name: state_name(&state).to_string(),
                state,
                month,
                total: s.total,
            }
        })
        .collect())
}

// ---
// Serviço: filtro -> join -> agregação sobre a sessão carregada.
// ---

#[derive(Clone)]
pub struct ReportService {
    repo: DatasetRepository,
}

impl ReportService {
    pub fn new(repo: DatasetRepository) -> Self {
        Self { repo }
    }

    pub fn filtered_sales(&self, range: &DateRange) -> Vec<&Sale> {
        filter_sales(&self.repo.session().sales, range)
    }

    pub fn get_sales_by_seller(&self, range: &DateRange) -> Result<Vec<SellerTotal>, AppError> {
        sales_by_seller(&self.filtered_sales(range), &self.repo.session().sellers)
    }

    pub fn get_sales_by_product(&self, range: &DateRange) -> Result<Vec<ProductTotal>, AppError> {
        sales_by_product(&self.filtered_sales(range), &self.repo.session().products)
    }

    pub fn get_sales_by_category(&self, range: &DateRange) -> Result<Vec<CategoryTotal>, AppError> {
        sales_by_category(&self.filtered_sales(range), &self.repo.session().products)
    }

    pub fn get_sales_by_month(&self, range: &DateRange) -> Result<Vec<MonthTotal>, AppError> {
        sales_by_month(&self.filtered_sales(range))
    }

    pub fn get_sales_by_state(&self, range: &DateRange) -> Result<Vec<StateTotal>, AppError> {
        sales_by_state(&self.filtered_sales(range), &self.repo.session().customers)
    }

    pub fn get_sales_by_state_month(
        &self,
        range: &DateRange,
    ) -> Result<Vec<StateMonthTotal>, AppError> {
        sales_by_state_month(&self.filtered_sales(range), &self.repo.session().customers)
    }

    // Aba "Vendas": um filtro só, cinco relatórios sobre ele.
    pub fn get_overview(&self, range: &DateRange) -> Result<DashboardOverview<'_>, AppError> {
        let session = self.repo.session();
        let sales = self.filtered_sales(range);

        let sales_total = sales.iter().try_fold(Decimal::ZERO, |acc, s| {
            acc.checked_add(s.total).ok_or(AppError::TotalOverflow)
        })?;

        Ok(DashboardOverview {
            sales_count: sales.len(),
            sales_total,
            by_seller: sales_by_seller(&sales, &session.sellers)?,
            by_product: sales_by_product(&sales, &session.products)?,
            by_category: sales_by_category(&sales, &session.products)?,
            by_month: sales_by_month(&sales)?,
            by_state: sales_by_state(&sales, &session.customers)?,
            sales,
        })
    }
}
