//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{ContactForm, ContactsApi, ContactsError, VendorRecord};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// The REST routes are built on top of this client, so HTTP and in-process
/// callers go through the same revision-synchronized code path.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ContactsApi for NativeClient {
    async fn list_contacts(&self) -> Result<Vec<VendorRecord>, ContactsError> {
        self.service.list_contacts().await
    }

    async fn create_contact(&self, form: ContactForm) -> Result<VendorRecord, ContactsError> {
        self.service.create_contact(form).await
    }

    async fn update_contact(
        &self,
        id: &str,
        form: ContactForm,
    ) -> Result<VendorRecord, ContactsError> {
        self.service.update_contact(id, form).await
    }

    async fn delete_contact(&self, id: &str) -> Result<VendorRecord, ContactsError> {
        self.service.delete_contact(id).await
    }
}
