//! Native client trait for in-process communication
//!
//! The REST layer and other in-process callers talk to the contacts
//! service through this trait. NO HTTP - direct function calls.

use super::{error::ContactsError, model::ContactForm, vendor::VendorRecord};
use async_trait::async_trait;

/// Contacts service API
#[async_trait]
pub trait ContactsApi: Send + Sync {
    /// List every contact the CRM returns
    async fn list_contacts(&self) -> Result<Vec<VendorRecord>, ContactsError>;

    /// Create a contact from a flat form
    async fn create_contact(&self, form: ContactForm) -> Result<VendorRecord, ContactsError>;

    /// Replace name, email and phone of a contact using its latest revision
    async fn update_contact(
        &self,
        id: &str,
        form: ContactForm,
    ) -> Result<VendorRecord, ContactsError>;

    /// Archive (soft delete) a contact using its latest revision
    async fn delete_contact(&self, id: &str) -> Result<VendorRecord, ContactsError>;
}
