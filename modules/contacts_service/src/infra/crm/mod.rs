//! CRM provider adapters

pub mod http;
pub mod memory;

pub use http::HttpCrmProvider;
pub use memory::InMemoryCrm;
