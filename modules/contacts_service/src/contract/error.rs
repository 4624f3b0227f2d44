//! Contract error types for contacts service
//!
//! These errors are transport-agnostic and used for in-process calls.
//! The REST layer maps them to HTTP responses in `api::rest::error`.

use super::model::ContactOp;
use crate::domain::crm::CrmError;

/// Contacts service errors
#[derive(Debug, thiserror::Error)]
pub enum ContactsError {
    /// User-correctable input problem (missing name)
    #[error("{message}")]
    Validation {
        /// Message returned to the client verbatim
        message: String,
    },

    /// The CRM call behind an operation failed
    #[error("{}", .op.failure_message())]
    Crm {
        /// Operation that was being performed
        op: ContactOp,
        /// Underlying CRM failure, logged but never sent to clients
        #[source]
        source: CrmError,
    },
}

impl ContactsError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn crm(op: ContactOp, source: CrmError) -> Self {
        Self::Crm { op, source }
    }

    /// True when the CRM rejected a stale revision
    pub fn is_revision_conflict(&self) -> bool {
        matches!(
            self,
            Self::Crm {
                source: CrmError::RevisionConflict { .. },
                ..
            }
        )
    }
}

impl From<crate::domain::normalizer::ValidationError> for ContactsError {
    fn from(err: crate::domain::normalizer::ValidationError) -> Self {
        Self::validation(err.to_string())
    }
}
