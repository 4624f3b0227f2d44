//! Domain layer - normalization, CRM port and the contacts service

pub mod crm;
pub mod normalizer;
pub mod service;

pub use crm::{CrmError, CrmProvider};
pub use normalizer::{to_client_view, to_vendor_payload, ValidationError};
pub use service::Service;
