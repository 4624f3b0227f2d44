//! REST DTOs with serde derives for HTTP API

use crate::contract::VendorRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Create/update request body
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContactFormDto {
    /// Full name; required, split into first and last on whitespace
    #[schema(example = "Jane Doe")]
    #[serde(default)]
    pub name: Option<String>,

    /// Primary email; blank or absent leaves the stored email untouched
    #[schema(example = "jane@example.com")]
    #[serde(default)]
    pub email: Option<String>,

    /// Primary phone; blank or absent leaves the stored phone untouched
    #[schema(example = "+972 54 123 4567")]
    #[serde(default)]
    pub phone: Option<String>,
}

/// List of vendor records, returned as received from the CRM
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContactsListResponse {
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<VendorRecord>,
}

/// Error body shared by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "name is required")]
    pub error: String,
}

// Note: Conversion implementations live in mapper.rs
