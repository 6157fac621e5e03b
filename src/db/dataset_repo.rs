// src/db/dataset_repo.rs

use std::{path::Path, sync::Arc};

use crate::{
    common::error::AppError,
    db::csv_loader,
    engine::join::DimensionTable,
    models::sales::{Customer, Product, Sale, Seller, Supplier},
};

/// As cinco tabelas base de uma sessão de relatórios.
///
/// Carregada uma vez e só lida depois disso. Os índices das dimensões são
/// montados aqui, na construção, e servem a todos os relatórios.
#[derive(Debug)]
pub struct SalesSession {
    pub sales: Vec<Sale>,
    pub products: DimensionTable<Product>,
    pub customers: DimensionTable<Customer>,
    pub sellers: DimensionTable<Seller>,
    pub suppliers: DimensionTable<Supplier>,
}

impl SalesSession {
    pub fn new(
        sales: Vec<Sale>,
        products: Vec<Product>,
        customers: Vec<Customer>,
        sellers: Vec<Seller>,
        suppliers: Vec<Supplier>,
    ) -> Self {
        Self {
            sales,
            products: DimensionTable::new(csv_loader::PRODUCTS_FILE, products),
            customers: DimensionTable::new(csv_loader::CUSTOMERS_FILE, customers),
            sellers: DimensionTable::new(csv_loader::SELLERS_FILE, sellers),
            suppliers: DimensionTable::new(csv_loader::SUPPLIERS_FILE, suppliers),
        }
    }

    // Lê as cinco planilhas do diretório de dados.
    pub fn load_from_dir(dir: &Path) -> Result<Self, AppError> {
        let products = csv_loader::read_products(csv_loader::open(dir, csv_loader::PRODUCTS_FILE)?)?;
        let customers = csv_loader::read_customers(csv_loader::open(dir, csv_loader::CUSTOMERS_FILE)?)?;
        let sellers = csv_loader::read_sellers(csv_loader::open(dir, csv_loader::SELLERS_FILE)?)?;
        let suppliers = csv_loader::read_suppliers(csv_loader::open(dir, csv_loader::SUPPLIERS_FILE)?)?;
        let sales = csv_loader::read_sales(csv_loader::open(dir, csv_loader::SALES_FILE)?)?;

        Ok(Self::new(sales, products, customers, sellers, suppliers))
    }
}

#[derive(Clone)]
pub struct DatasetRepository {
    session: Arc<SalesSession>,
}

impl DatasetRepository {
    pub fn new(session: SalesSession) -> Self {
        Self {
            session: Arc::new(session),
        }
    }

    pub fn session(&self) -> &SalesSession {
        &self.session
    }

    pub fn products(&self) -> &[Product] {
        self.session.products.rows()
    }

    pub fn customers(&self) -> &[Customer] {
        self.session.customers.rows()
    }

    pub fn sellers(&self) -> &[Seller] {
        self.session.sellers.rows()
    }

    pub fn suppliers(&self) -> &[Supplier] {
        self.session.suppliers.rows()
    }

    pub fn get_product(&self, product_id: &str) -> Result<&Product, AppError> {
        self.session
            .products
            .get(product_id)
            .ok_or_else(|| AppError::ProductNotFound(product_id.to_string()))
    }

    pub fn get_customer(&self, customer_id: &str) -> Result<&Customer, AppError> {
        self.session
            .customers
            .get(customer_id)
            .ok_or_else(|| AppError::CustomerNotFound(customer_id.to_string()))
    }

    pub fn get_seller(&self, seller_id: &str) -> Result<&Seller, AppError> {
        self.session
            .sellers
            .get(seller_id)
            .ok_or_else(|| AppError::SellerNotFound(seller_id.to_string()))
    }
}
