//! Infrastructure layer - CRM adapters

pub mod crm;
