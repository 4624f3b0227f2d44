//! Domain service - revision-synchronized contact operations
//!
//! Every mutation first reads the record to obtain its latest revision and
//! then sends that revision with the mutation. Steps run sequentially and
//! nothing is retried: a revision conflict reported by the CRM is returned
//! to the caller as-is. Overlapping requests for the same id are not
//! serialized here; the CRM's revision check is the only arbiter.

use super::crm::{CrmError, CrmProvider};
use super::normalizer::to_vendor_payload;
use crate::config::MissingRevisionPolicy;
use crate::contract::{ContactForm, ContactOp, ContactsError, Revision, VendorRecord};
use std::sync::Arc;

/// Domain service for contacts management
pub struct Service {
    crm: Arc<dyn CrmProvider>,
    missing_revision: MissingRevisionPolicy,
}

impl Service {
    /// Create a new service instance
    pub fn new(crm: Arc<dyn CrmProvider>) -> Self {
        Self {
            crm,
            missing_revision: MissingRevisionPolicy::default(),
        }
    }

    /// Override what happens when the CRM returns a record without a revision
    pub fn with_missing_revision(mut self, policy: MissingRevisionPolicy) -> Self {
        self.missing_revision = policy;
        self
    }

    /// List all contacts
    pub async fn list_contacts(&self) -> Result<Vec<VendorRecord>, ContactsError> {
        let items = self
            .crm
            .list()
            .await
            .map_err(|e| crm_failure(ContactOp::List, e))?;
        tracing::debug!(count = items.len(), "listed contacts");
        Ok(items)
    }

    /// Create a contact
    pub async fn create_contact(&self, form: ContactForm) -> Result<VendorRecord, ContactsError> {
        let info = to_vendor_payload(&form)?;

        let created = self
            .crm
            .create(info)
            .await
            .map_err(|e| crm_failure(ContactOp::Create, e))?;
        tracing::info!(id = %created.id, "contact created");
        Ok(created)
    }

    /// Update a contact using the revision read just before the write
    pub async fn update_contact(
        &self,
        id: &str,
        form: ContactForm,
    ) -> Result<VendorRecord, ContactsError> {
        let revision = self.current_revision(ContactOp::Update, id).await?;
        let info = to_vendor_payload(&form)?;

        tracing::debug!(id, %revision, "updating contact");
        let updated = self
            .crm
            .update(id, info, revision)
            .await
            .map_err(|e| crm_failure(ContactOp::Update, e))?;
        tracing::info!(id, "contact updated");
        Ok(updated)
    }

    /// Archive a contact using the revision read just before the write
    pub async fn delete_contact(&self, id: &str) -> Result<VendorRecord, ContactsError> {
        let revision = self.current_revision(ContactOp::Delete, id).await?;

        tracing::debug!(id, %revision, "archiving contact");
        let archived = self
            .crm
            .archive(id, revision)
            .await
            .map_err(|e| crm_failure(ContactOp::Delete, e))?;
        tracing::info!(id, "contact archived");
        Ok(archived)
    }

    async fn current_revision(&self, op: ContactOp, id: &str) -> Result<Revision, ContactsError> {
        let current = self.crm.get(id).await.map_err(|e| crm_failure(op, e))?;

        match (current.revision, self.missing_revision) {
            (Some(revision), _) => Ok(revision),
            (None, MissingRevisionPolicy::Zero) => {
                tracing::warn!(id, op = %op, "contact has no revision, falling back to 0");
                Ok(Revision(0))
            }
            (None, MissingRevisionPolicy::Reject) => Err(crm_failure(
                op,
                CrmError::MissingRevision { id: id.to_string() },
            )),
        }
    }
}

/// Log the cause and wrap it; only the op's fixed message reaches clients
fn crm_failure(op: ContactOp, source: CrmError) -> ContactsError {
    tracing::error!(op = %op, error = %source, "{} error", op);
    ContactsError::crm(op, source)
}
