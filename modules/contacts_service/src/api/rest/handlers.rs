//! HTTP request handlers - thin layer that delegates to the contacts API

use super::{
    dto::{ContactFormDto, ContactsListResponse},
    error::{map_domain_error, ApiError, INVALID_BODY},
};
use crate::contract::{ContactForm, ContactsApi, VendorRecord};
use axum::{body::Bytes, extract::Path, Json};
use std::sync::Arc;

/// List contacts
pub async fn list_contacts(
    api: Arc<dyn ContactsApi>,
) -> Result<Json<ContactsListResponse>, ApiError> {
    let items = api.list_contacts().await.map_err(map_domain_error)?;
    Ok(Json(ContactsListResponse { items }))
}

/// Create a contact
pub async fn create_contact(
    api: Arc<dyn ContactsApi>,
    body: Bytes,
) -> Result<Json<VendorRecord>, ApiError> {
    let form = parse_form(&body)?;
    let created = api.create_contact(form).await.map_err(map_domain_error)?;
    Ok(Json(created))
}

/// Update a contact
pub async fn update_contact(
    api: Arc<dyn ContactsApi>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<VendorRecord>, ApiError> {
    let form = parse_form(&body)?;
    let updated = api
        .update_contact(&id, form)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(updated))
}

/// Archive a contact
pub async fn delete_contact(
    api: Arc<dyn ContactsApi>,
    Path(id): Path<String>,
) -> Result<Json<VendorRecord>, ApiError> {
    let archived = api.delete_contact(&id).await.map_err(map_domain_error)?;
    Ok(Json(archived))
}

/// Missing or `null` bodies are an empty form; name validation happens downstream
fn parse_form(body: &[u8]) -> Result<ContactForm, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ContactForm::default());
    }

    let dto: Option<ContactFormDto> = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "rejecting request body");
        ApiError::bad_request(INVALID_BODY)
    })?;
    Ok(dto.unwrap_or_default().into())
}
