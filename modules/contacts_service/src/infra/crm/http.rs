//! HTTP CRM provider (vendor contacts REST API)
//!
//! Endpoints, relative to the configured base URL:
//! - `GET    contacts`                list
//! - `GET    contacts/{id}`           get
//! - `POST   contacts`                create, body `{info}`
//! - `PATCH  contacts/{id}`           update, body `{info, revision}`
//! - `POST   contacts/{id}/archive`   archive, body `{revision}`
//!
//! 404 maps to `NotFound`; 409 and 412 on a mutation map to `RevisionConflict`.

use crate::contract::{Revision, VendorInfo, VendorRecord};
use crate::domain::crm::{CrmError, CrmProvider};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Map, Value};
use url::Url;

pub struct HttpCrmProvider {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpCrmProvider {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, CrmError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CrmError::Transport(format!("invalid CRM base url '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CrmError::Transport(format!(
                "invalid CRM base url '{base_url}'"
            )));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| CrmError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CrmError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| CrmError::Transport(format!("invalid CRM base url '{}'", self.base_url)))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        id: Option<&str>,
        revision: Option<Revision>,
    ) -> Result<Value, CrmError> {
        let request = match &self.api_key {
            Some(key) => request.header(AUTHORIZATION, key),
            None => request,
        };

        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CrmError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CrmError::Transport(e.to_string()))?;

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(Value::Object(Map::new()));
            }
            return serde_json::from_str(&body).map_err(|e| CrmError::Decode(e.to_string()));
        }

        tracing::debug!(status = status.as_u16(), ?id, "CRM request failed");
        Err(match (status, id, revision) {
            (StatusCode::NOT_FOUND, Some(id), _) => CrmError::NotFound { id: id.to_string() },
            (StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED, Some(id), Some(sent)) => {
                CrmError::RevisionConflict {
                    id: id.to_string(),
                    sent,
                }
            }
            _ => CrmError::Status {
                status: status.as_u16(),
                body,
            },
        })
    }
}

fn decode_record(value: Value) -> Result<VendorRecord, CrmError> {
    VendorRecord::from_response(value).map_err(|e| CrmError::Decode(e.to_string()))
}

#[async_trait]
impl CrmProvider for HttpCrmProvider {
    async fn list(&self) -> Result<Vec<VendorRecord>, CrmError> {
        let url = self.endpoint(&["contacts"])?;
        let value = self.execute(self.client.get(url), None, None).await?;
        VendorRecord::list_from_response(value).map_err(|e| CrmError::Decode(e.to_string()))
    }

    async fn get(&self, id: &str) -> Result<VendorRecord, CrmError> {
        let url = self.endpoint(&["contacts", id])?;
        decode_record(self.execute(self.client.get(url), Some(id), None).await?)
    }

    async fn create(&self, info: VendorInfo) -> Result<VendorRecord, CrmError> {
        let url = self.endpoint(&["contacts"])?;
        let request = self.client.post(url).json(&json!({ "info": info }));
        decode_record(self.execute(request, None, None).await?)
    }

    async fn update(
        &self,
        id: &str,
        info: VendorInfo,
        revision: Revision,
    ) -> Result<VendorRecord, CrmError> {
        let url = self.endpoint(&["contacts", id])?;
        let request = self
            .client
            .patch(url)
            .json(&json!({ "info": info, "revision": revision }));
        decode_record(self.execute(request, Some(id), Some(revision)).await?)
    }

    async fn archive(&self, id: &str, revision: Revision) -> Result<VendorRecord, CrmError> {
        let url = self.endpoint(&["contacts", id, "archive"])?;
        let request = self.client.post(url).json(&json!({ "revision": revision }));
        decode_record(self.execute(request, Some(id), Some(revision)).await?)
    }
}
