//! Contacts Service Module
//!
//! CRUD administration for contacts stored in an external CRM: a REST
//! layer that keeps mutations revision-synchronized with the CRM, and a
//! dashboard (HTTP client, contact store, page state) that consumes it.

// Public exports
pub mod contract;
pub use contract::{
    client::ContactsApi, error::ContactsError, Contact, ContactForm, Revision, VendorInfo,
    VendorRecord,
};

pub mod module;
pub use module::ContactsServiceModule;

pub mod config;
pub mod dashboard;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
