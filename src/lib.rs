pub mod client;
pub mod config;
pub mod error;
pub mod quotation;
pub mod service;
pub mod store;
pub mod upstream;

#[cfg(test)]
mod testing;

pub use config::{Budgets, ClientConfig, ServerConfig};
pub use error::{Error, Result};
pub use quotation::{BidQuotation, Quotation};
pub use store::QuotationStore;
pub use upstream::UpstreamClient;
