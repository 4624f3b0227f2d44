//! JSON-over-HTTP client facade used by the dashboard
//!
//! Every call sends one request and reads the response body exactly once
//! as text. The text is parsed as JSON when possible. Non-2xx responses
//! become a [`RequestError`] whose message is, in order of preference, the
//! body's `error` or `message` string, the raw body, or
//! `"{status} {reason}"`.

use reqwest::{Client, Method, StatusCode};
use serde_json::{Map, Value};
use url::Url;

/// Uniform failure of a dashboard HTTP call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    /// HTTP status, `None` when no response was received
    pub status: Option<u16>,
    pub message: String,
}

impl RequestError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self {
            status: None,
            message: err.to_string(),
        }
    }
}

pub struct HttpJson {
    client: Client,
    base_url: Url,
}

impl HttpJson {
    pub fn new(base_url: &str) -> Result<Self, RequestError> {
        let base_url = Url::parse(base_url).map_err(|e| RequestError {
            status: None,
            message: format!("invalid base url '{base_url}': {e}"),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RequestError {
                status: None,
                message: format!("invalid base url '{base_url}'"),
            });
        }
        let client = Client::builder().build().map_err(RequestError::transport)?;

        Ok(Self { client, base_url })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, RequestError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| RequestError::transport("base url cannot carry a path"))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Perform one request and return the parsed JSON body (`{}` when empty)
    pub async fn send(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&Value>,
    ) -> Result<Value, RequestError> {
        let url = self.url(segments)?;
        tracing::debug!(%method, %url, "dashboard request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(RequestError::transport)?;
        let status = response.status();
        let raw = response.text().await.map_err(RequestError::transport)?;

        let data = if raw.is_empty() {
            None
        } else {
            serde_json::from_str::<Value>(&raw).ok()
        };

        if !status.is_success() {
            return Err(RequestError {
                status: Some(status.as_u16()),
                message: failure_message(status, data.as_ref(), &raw),
            });
        }

        Ok(data.unwrap_or_else(|| Value::Object(Map::new())))
    }
}

fn failure_message(status: StatusCode, data: Option<&Value>, raw: &str) -> String {
    let reported = data.and_then(|data| {
        ["error", "message"].iter().find_map(|key| {
            data.get(*key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
    });

    reported
        .or_else(|| (!raw.is_empty()).then(|| raw.to_string()))
        .unwrap_or_else(|| {
            format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )
            .trim_end()
            .to_string()
        })
}
