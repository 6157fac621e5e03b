pub mod brazil;
pub mod dashboard;
pub mod sales;
