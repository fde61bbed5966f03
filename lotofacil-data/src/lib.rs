pub mod import;
pub mod models;
