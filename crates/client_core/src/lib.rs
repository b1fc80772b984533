//! HTTP client for the order tracking REST API.
//!
//! [`OrdersClient`] is a thin wrapper over `reqwest` with no retries, no
//! caching, and no in-flight cancellation: every call maps to exactly one
//! request, and every failure is reported to the caller as a
//! [`ClientError`]. The [`OrdersApi`] trait is the seam the GUI backend
//! worker is written against, so tests can drive it with a stub.

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, StatusCode};
use serde_json::Value;
use shared::{
    domain::Order,
    protocol::{ApiErrorBody, GeneratedOrder},
};
use thiserror::Error;
use tracing::debug;
use url::Url;


pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status. The body is carried
    /// verbatim so the UI can surface exactly what the server said.
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response parsed as JSON but did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("invalid base url: {0}")]
    BaseUrl(String),
}

#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// GET `/api/orders/uid/{uid}`.
    async fn fetch_order(&self, uid: &str) -> Result<Order>;

    /// GET `/api/orders`. The response must be a JSON array.
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// POST `/api/fake/generate`.
    async fn generate_order(&self) -> Result<GeneratedOrder>;
}

#[derive(Debug, Clone)]
pub struct OrdersClient {
    http: Client,
    base: Url,
}

impl OrdersClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|err| ClientError::BaseUrl(format!("{base_url}: {err}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::BaseUrl(format!(
                "{base_url}: missing host or scheme"
            )));
        }
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        {
            // Checked in `new`: the base url can carry path segments.
            let mut path = url.path_segments_mut().expect("base url validated");
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn read_error_body(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ClientError::Status { status, body }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl OrdersApi for OrdersClient {
    async fn fetch_order(&self, uid: &str) -> Result<Order> {
        let url = self.endpoint(&["api", "orders", "uid", uid]);
        debug!(%url, "fetching order by uid");
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::read_error_body(response).await);
        }
        Ok(response.json().await?)
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let url = self.endpoint(&["api", "orders"]);
        debug!(%url, "fetching full order list");
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::read_error_body(response).await);
        }
        let body: Value = response.json().await?;
        if !body.is_array() {
            return Err(ClientError::UnexpectedShape(format!(
                "expected an array of orders, got {}",
                json_kind(&body)
            )));
        }
        serde_json::from_value(body)
            .map_err(|err| ClientError::UnexpectedShape(format!("malformed order entry: {err}")))
    }

    async fn generate_order(&self) -> Result<GeneratedOrder> {
        let url = self.endpoint(&["api", "fake", "generate"]);
        debug!(%url, "requesting fake order generation");
        let response = self
            .http
            .post(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            // Prefer the backend's `{error}` envelope over the raw body.
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|envelope| envelope.error)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .map(str::to_string)
                        .unwrap_or_else(|| status.to_string())
                });
            return Err(ClientError::Status {
                status,
                body: message,
            });
        }
        Ok(response.json().await?)
    }
}
