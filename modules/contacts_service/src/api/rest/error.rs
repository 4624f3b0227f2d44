//! HTTP error mapping
//!
//! Every failure leaves the server as `{"error": "<message>"}`. CRM detail
//! is logged by the domain service and never copied into the body.

use super::dto::ErrorBody;
use crate::contract::ContactsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Message for request bodies that are not JSON
pub const INVALID_BODY: &str = "invalid JSON body";

/// Error response: status plus a client-safe message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.error })).into_response()
    }
}

/// Map domain errors to HTTP errors
pub fn map_domain_error(error: ContactsError) -> ApiError {
    match error {
        ContactsError::Validation { message } => ApiError::bad_request(message),
        ContactsError::Crm { op, .. } => {
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, op.failure_message())
        }
    }
}
