// src/db/csv_loader.rs

// Fronteira de ingestão: tudo que passa daqui já está tipado e validado.
// O motor de agregação confia nisso e não revalida nada.

use std::{fs::File, io, path::Path};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    models::sales::{Customer, Product, Sale, Seller, Supplier},
};

pub const SALES_FILE: &str = "vendas.csv";
pub const PRODUCTS_FILE: &str = "produtos.csv";
pub const CUSTOMERS_FILE: &str = "clientes.csv";
pub const SELLERS_FILE: &str = "vendedores.csv";
pub const SUPPLIERS_FILE: &str = "fornecedores.csv";

// ---
// Validação Customizada
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

/// Aceita "2024-01-05" e também data com hora ("2024-01-05 10:30:00"),
/// descartando a hora.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
                .ok()
                .map(|dt| dt.date())
        })
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("data inválida: '{raw}'")))
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();

    raw.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| serde::de::Error::custom(format!("valor numérico inválido: '{raw}'")))
}

// ---
// Registros crus (cabeçalhos em português, como nas planilhas originais,
// ou em inglês)
// ---

#[derive(Debug, Deserialize, Validate)]
struct SaleRecord {
    #[serde(default, alias = "venda_id", alias = "id")]
    sale_id: Option<String>,

    #[serde(alias = "vendedor_id")]
    #[validate(length(min = 1, message = "O campo 'vendedor_id' é obrigatório."))]
    seller_id: String,

    #[serde(alias = "produto_id")]
    #[validate(length(min = 1, message = "O campo 'produto_id' é obrigatório."))]
    product_id: String,

    #[serde(alias = "cliente_id")]
    #[validate(length(min = 1, message = "O campo 'cliente_id' é obrigatório."))]
    customer_id: String,

    #[serde(alias = "data", deserialize_with = "deserialize_date")]
    date: NaiveDate,

    #[serde(deserialize_with = "deserialize_decimal")]
    #[validate(custom(function = "validate_not_negative"))]
    total: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
struct ProductRecord {
    #[serde(alias = "produto_id")]
    #[validate(length(min = 1, message = "O campo 'produto_id' é obrigatório."))]
    product_id: String,

    #[serde(alias = "nome")]
    name: String,

    #[serde(alias = "categoria")]
    category: String,
}

#[derive(Debug, Deserialize, Validate)]
struct CustomerRecord {
    #[serde(alias = "cliente_id")]
    #[validate(length(min = 1, message = "O campo 'cliente_id' é obrigatório."))]
    customer_id: String,

    #[serde(alias = "nome")]
    name: String,

    #[serde(alias = "estado")]
    #[validate(length(min = 1, message = "O campo 'estado' é obrigatório."))]
    state: String,
}

#[derive(Debug, Deserialize, Validate)]
struct SellerRecord {
    #[serde(alias = "vendedor_id")]
    #[validate(length(min = 1, message = "O campo 'vendedor_id' é obrigatório."))]
    seller_id: String,

    #[serde(alias = "nome")]
    name: String,
}

#[derive(Debug, Deserialize, Validate)]
struct SupplierRecord {
    #[serde(alias = "fornecedor_id")]
    #[validate(length(min = 1, message = "O campo 'fornecedor_id' é obrigatório."))]
    supplier_id: String,

    #[serde(alias = "nome")]
    name: String,
}

// Registro cru -> modelo do domínio. `row` é a linha de dados (1 = primeira
// linha depois do cabeçalho).
trait CsvRecord: DeserializeOwned + Validate {
    type Model;

    fn into_model(self, row: usize) -> Self::Model;
}

impl CsvRecord for SaleRecord {
    type Model = Sale;

    fn into_model(self, row: usize) -> Sale {
        Sale {
            // Sem coluna de id, a posição na planilha serve de identificador.
            sale_id: self.sale_id.unwrap_or_else(|| row.to_string()),
            seller_id: self.seller_id,
            product_id: self.product_id,
            customer_id: self.customer_id,
            date: self.date,
            total: self.total,
        }
    }
}

impl CsvRecord for ProductRecord {
    type Model = Product;

    fn into_model(self, _row: usize) -> Product {
        Product {
            product_id: self.product_id,
            name: self.name,
            category: self.category,
        }
    }
}

impl CsvRecord for CustomerRecord {
    type Model = Customer;

    fn into_model(self, _row: usize) -> Customer {
        Customer {
            customer_id: self.customer_id,
            name: self.name,
            state: self.state.to_uppercase(),
        }
    }
}

impl CsvRecord for SellerRecord {
    type Model = Seller;

    fn into_model(self, _row: usize) -> Seller {
        Seller {
            seller_id: self.seller_id,
            name: self.name,
        }
    }
}

impl CsvRecord for SupplierRecord {
    type Model = Supplier;

    fn into_model(self, _row: usize) -> Supplier {
        Supplier {
            supplier_id: self.supplier_id,
            name: self.name,
        }
    }
}

fn read_table<T, R>(reader: R, file: &str) -> Result<Vec<T::Model>, AppError>
where
    T: CsvRecord,
    R: io::Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize::<T>().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|source| AppError::Csv {
            file: file.to_string(),
            source,
        })?;
        record.validate().map_err(|source| AppError::InvalidRecord {
            file: file.to_string(),
            row,
            source,
        })?;
        rows.push(record.into_model(row));
    }

    tracing::info!("📄 '{}': {} registro(s) carregado(s)", file, rows.len());
    Ok(rows)
}

pub fn read_sales<R: io::Read>(reader: R) -> Result<Vec<Sale>, AppError> {
    read_table::<SaleRecord, _>(reader, SALES_FILE)
}

pub fn read_products<R: io::Read>(reader: R) -> Result<Vec<Product>, AppError> {
    read_table::<ProductRecord, _>(reader, PRODUCTS_FILE)
}

pub fn read_customers<R: io::Read>(reader: R) -> Result<Vec<Customer>, AppError> {
    read_table::<CustomerRecord, _>(reader, CUSTOMERS_FILE)
}

pub fn read_sellers<R: io::Read>(reader: R) -> Result<Vec<Seller>, AppError> {
    read_table::<SellerRecord, _>(reader, SELLERS_FILE)
}

pub fn read_suppliers<R: io::Read>(reader: R) -> Result<Vec<Supplier>, AppError> {
    read_table::<SupplierRecord, _>(reader, SUPPLIERS_FILE)
}

pub fn open(dir: &Path, file: &str) -> Result<File, AppError> {
    File::open(dir.join(file)).map_err(|source| AppError::Io {
        file: file.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_portuguese_headers() {
        let csv = "venda_id,vendedor_id,produto_id,cliente_id,data,total\n\
                   1,10,100,1000,2024-01-05,100.50\n\
                   2,10,101,1000,2024-02-10 14:30:00,50\n";

        let sales = read_sales(csv.as_bytes()).unwrap();

        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].sale_id, "1");
        assert_eq!(sales[0].seller_id, "10");
        assert_eq!(sales[0].total, Decimal::new(10050, 2));
        assert_eq!(sales[1].date, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
    }

    #[test]
    fn reads_english_headers_and_ignores_extra_columns() {
        let csv = "seller_id,product_id,customer_id,date,total,channel\n\
                   S1,P1,C1,2024-03-01,12.5,web\n";

        let sales = read_sales(csv.as_bytes()).unwrap();

        assert_eq!(sales.len(), 1);
        // Sem coluna de id: usa a linha.
        assert_eq!(sales[0].sale_id, "1");
        assert_eq!(sales[0].product_id, "P1");
    }

    #[test]
    fn rejects_negative_total() {
        let csv = "vendedor_id,produto_id,cliente_id,data,total\n\
                   S1,P1,C1,2024-01-01,10\n\
                   S1,P1,C1,2024-01-02,-5\n";

        let err = read_sales(csv.as_bytes()).unwrap_err();

        match err {
            AppError::InvalidRecord { file, row, .. } => {
                assert_eq!(file, SALES_FILE);
                assert_eq!(row, 2);
            }
            other => panic!("erro inesperado: {other:?}"),
        }
    }

    #[test]
    fn rejects_unparsable_date() {
        let csv = "vendedor_id,produto_id,cliente_id,data,total\n\
                   S1,P1,C1,05/01/2024,10\n";

        let err = read_sales(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, AppError::Csv { .. }));
    }

    #[test]
    fn rejects_non_numeric_total() {
        let csv = "vendedor_id,produto_id,cliente_id,data,total\n\
                   S1,P1,C1,2024-01-01,abc\n";

        assert!(matches!(
            read_sales(csv.as_bytes()),
            Err(AppError::Csv { .. })
        ));
    }

    #[test]
    fn reads_dimension_tables() {
        let products = read_products("produto_id,nome,categoria\nP1,Caneta,Papelaria\n".as_bytes()).unwrap();
        assert_eq!(products[0].category, "Papelaria");

        let customers = read_customers("cliente_id,nome,estado\nC1,Maria, sp \n".as_bytes()).unwrap();
        assert_eq!(customers[0].state, "SP");

        let sellers = read_sellers("vendedor_id,nome\nS1,Ana\n".as_bytes()).unwrap();
        assert_eq!(sellers[0].name, "Ana");

        let suppliers = read_suppliers("fornecedor_id,nome,cnpj\nF1,Distribuidora Sul,123\n".as_bytes()).unwrap();
        assert_eq!(suppliers[0].supplier_id, "F1");
    }

    #[test]
    fn customer_without_state_is_rejected() {
        let err = read_customers("cliente_id,nome,estado\nC1,Maria,\n".as_bytes()).unwrap_err();

        assert!(matches!(err, AppError::InvalidRecord { row: 1, .. }));
    }

    #[test]
    fn parse_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5);
        assert_eq!(parse_date("2024-01-05"), expected);
        assert_eq!(parse_date(" 2024-01-05 "), expected);
        assert_eq!(parse_date("2024-01-05 23:59:59"), expected);
        assert_eq!(parse_date("2024-01-05T08:00:00"), expected);
        assert_eq!(parse_date("2024-13-01"), None);
    }
}
