//! Dashboard backend: the four REST calls, normalized to client views

use super::http::{HttpJson, RequestError};
use crate::contract::{Contact, ContactForm, VendorRecord};
use crate::domain::normalizer::to_client_view;
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Operations the dashboard page needs from its backend
#[async_trait]
pub trait ContactsBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<Contact>, RequestError>;

    async fn create(&self, form: &ContactForm) -> Result<Contact, RequestError>;

    async fn update(&self, id: &str, form: &ContactForm) -> Result<Contact, RequestError>;

    async fn delete(&self, id: &str) -> Result<(), RequestError>;
}

/// Backend talking to the contacts REST endpoints
pub struct ContactsClient {
    http: HttpJson,
}

#[derive(Serialize)]
struct FormBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
}

impl<'a> From<&'a ContactForm> for FormBody<'a> {
    fn from(form: &'a ContactForm) -> Self {
        Self {
            name: &form.name,
            email: form.email.as_deref(),
            phone: form.phone.as_deref(),
        }
    }
}

impl ContactsClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8087`
    pub fn new(base_url: &str) -> Result<Self, RequestError> {
        Ok(Self {
            http: HttpJson::new(base_url)?,
        })
    }

    fn form_body(form: &ContactForm) -> Result<Value, RequestError> {
        serde_json::to_value(FormBody::from(form)).map_err(RequestError::transport)
    }
}

fn decode_contact(value: Value) -> Result<Contact, RequestError> {
    VendorRecord::from_response(value)
        .map(|record| to_client_view(&record))
        .map_err(|e| RequestError::transport(format!("invalid contact in response: {e}")))
}

#[async_trait]
impl ContactsBackend for ContactsClient {
    async fn list(&self) -> Result<Vec<Contact>, RequestError> {
        let value = self
            .http
            .send(Method::GET, &["api", "contacts"], None)
            .await?;
        let records = VendorRecord::list_from_response(value)
            .map_err(|e| RequestError::transport(format!("invalid contact list: {e}")))?;
        Ok(records.iter().map(to_client_view).collect())
    }

    async fn create(&self, form: &ContactForm) -> Result<Contact, RequestError> {
        let body = Self::form_body(form)?;
        let value = self
            .http
            .send(Method::POST, &["api", "contacts"], Some(&body))
            .await?;
        decode_contact(value)
    }

    async fn update(&self, id: &str, form: &ContactForm) -> Result<Contact, RequestError> {
        let body = Self::form_body(form)?;
        let value = self
            .http
            .send(Method::PATCH, &["api", "contacts", id], Some(&body))
            .await?;
        decode_contact(value)
    }

    async fn delete(&self, id: &str) -> Result<(), RequestError> {
        self.http
            .send(Method::DELETE, &["api", "contacts", id], None)
            .await?;
        Ok(())
    }
}
