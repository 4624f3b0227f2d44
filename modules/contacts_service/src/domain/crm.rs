//! CRM provider port
//!
//! The external CRM owns all persistence. Implementations live in
//! `infra/crm` (HTTP adapter and in-memory provider).

use crate::contract::{Revision, VendorInfo, VendorRecord};
use async_trait::async_trait;

/// Failures reported by a CRM provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CrmError {
    #[error("contact not found: {id}")]
    NotFound { id: String },

    /// The revision sent with a mutation is not the current one
    #[error("revision conflict on contact {id}: sent {sent}")]
    RevisionConflict { id: String, sent: Revision },

    /// The CRM returned a record without a revision and the service is
    /// configured to refuse guessing one
    #[error("contact {id} has no revision")]
    MissingRevision { id: String },

    #[error("CRM responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("CRM transport error: {0}")]
    Transport(String),

    #[error("invalid CRM response: {0}")]
    Decode(String),
}

/// Contract required from the CRM
#[async_trait]
pub trait CrmProvider: Send + Sync {
    /// Query all (non-archived) contacts
    async fn list(&self) -> Result<Vec<VendorRecord>, CrmError>;

    /// Read one contact, including its current revision
    async fn get(&self, id: &str) -> Result<VendorRecord, CrmError>;

    /// Create a contact; the CRM assigns the id and first revision
    async fn create(&self, info: VendorInfo) -> Result<VendorRecord, CrmError>;

    /// Update a contact. Fails with `RevisionConflict` on a stale revision.
    async fn update(
        &self,
        id: &str,
        info: VendorInfo,
        revision: Revision,
    ) -> Result<VendorRecord, CrmError>;

    /// Archive (soft delete) a contact. Fails with `RevisionConflict` on a stale revision.
    async fn archive(&self, id: &str, revision: Revision) -> Result<VendorRecord, CrmError>;
}
