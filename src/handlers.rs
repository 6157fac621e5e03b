pub mod catalog;
pub mod reports;
