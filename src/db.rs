pub mod csv_loader;
pub mod dataset_repo;
pub use dataset_repo::{DatasetRepository, SalesSession};
