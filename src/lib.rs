pub mod ai;
pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use client::{ClientError, ScanClient};
pub use config::AppConfig;
pub use error::ScanError;
pub use service::ReceiptExtractor;
