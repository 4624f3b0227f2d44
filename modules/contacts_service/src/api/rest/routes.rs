//! Route registration
//!
//! | Method | Path                | Handler        |
//! |--------|---------------------|----------------|
//! | GET    | /api/contacts       | list_contacts  |
//! | POST   | /api/contacts       | create_contact |
//! | PATCH  | /api/contacts/{id}  | update_contact |
//! | DELETE | /api/contacts/{id}  | delete_contact |
//! | GET    | /api/openapi.json   | OpenAPI document |

use super::{
    dto::{ContactFormDto, ContactsListResponse, ErrorBody},
    error::ApiError,
    handlers,
};
use crate::contract::{ContactsApi, VendorRecord};
use axum::{
    body::Bytes,
    extract::Path,
    routing::{get, patch},
    Extension, Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Contacts API"),
    components(schemas(ContactFormDto, ContactsListResponse, ErrorBody))
)]
pub struct ApiDoc;

/// Register all REST routes
pub fn register_routes(router: Router, api: Arc<dyn ContactsApi>) -> anyhow::Result<Router> {
    let router = router
        .route(
            "/api/contacts",
            get(list_contacts_handler).post(create_contact_handler),
        )
        .route(
            "/api/contacts/{id}",
            patch(update_contact_handler).delete(delete_contact_handler),
        )
        .route("/api/openapi.json", get(openapi_handler))
        .layer(Extension(api));

    Ok(router)
}

// ===== Handler wrappers that extract the API from Extension =====

async fn list_contacts_handler(
    Extension(api): Extension<Arc<dyn ContactsApi>>,
) -> Result<Json<ContactsListResponse>, ApiError> {
    handlers::list_contacts(api).await
}

async fn create_contact_handler(
    Extension(api): Extension<Arc<dyn ContactsApi>>,
    body: Bytes,
) -> Result<Json<VendorRecord>, ApiError> {
    handlers::create_contact(api, body).await
}

async fn update_contact_handler(
    Extension(api): Extension<Arc<dyn ContactsApi>>,
    path: Path<String>,
    body: Bytes,
) -> Result<Json<VendorRecord>, ApiError> {
    handlers::update_contact(api, path, body).await
}

async fn delete_contact_handler(
    Extension(api): Extension<Arc<dyn ContactsApi>>,
    path: Path<String>,
) -> Result<Json<VendorRecord>, ApiError> {
    handlers::delete_contact(api, path).await
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
