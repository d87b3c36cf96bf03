//! Upstream price-list API client
//!
//! The upstream expects a signed `pricelist` command and answers with a JSON
//! object whose `data` field holds the flat product list. Every failure is
//! normalised into a [`FetchError`] so the grouping engine only ever sees a
//! validated array of records.

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use pricelist_common::config::UpstreamConfig;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

pub const PRICELIST_COMMAND: &str = "pricelist";
const USER_AGENT: &str = concat!("pricelist-server/", env!("CARGO_PKG_VERSION"));

/// Upstream fetch errors
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Credentials or URL absent
    #[error("Upstream configuration missing: {0}")]
    ConfigurationMissing(String),

    /// Network failure or timeout; the detail is only logged
    #[error("No response received from API (timeout or network issue)")]
    Unavailable(String),

    /// Request could not be built or sent
    #[error("API request error: {0}")]
    Request(String),

    /// Upstream answered with a non-2xx status
    #[error("API Error: {status} - {body}")]
    Status { status: u16, body: String },

    /// Body is not JSON or lacks an array `data` field
    #[error("Invalid response from external API: {0}")]
    MalformedPayload(String),

    /// Upstream answered 2xx with its own `error` message
    #[error("{0}")]
    Reported(String),
}

/// Source of the flat upstream product list
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_records(&self) -> Result<Arc<Vec<Value>>, FetchError>;

    /// Where records come from, without contacting it
    fn describe(&self) -> SourceInfo {
        SourceInfo::default()
    }
}

/// Static description of a [`PriceSource`], reported by `/health`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Overlapping requests share one upstream call
    pub coalesced: bool,
}

/// Request body of the `pricelist` command
#[derive(Debug, Serialize)]
struct PriceListRequest<'a> {
    command: &'a str,
    username: &'a str,
    sign: String,
}

/// `hex(md5(username + api_key + command))`
pub fn sign(username: &str, api_key: &str, command: &str) -> String {
    let digest = md5::compute(format!("{username}{api_key}{command}"));
    format!("{:x}", digest)
}

/// Extract the product array from an upstream response body
pub fn parse_payload(body: &[u8]) -> Result<Vec<Value>, FetchError> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| FetchError::MalformedPayload(format!("body is not JSON: {e}")))?;

    if let Some(message) = payload.get("error").and_then(Value::as_str) {
        if !message.is_empty() {
            return Err(FetchError::Reported(message.to_string()));
        }
    }

    match payload {
        Value::Object(mut object) => match object.remove("data") {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Err(FetchError::MalformedPayload(format!(
                "data is {} instead of an array",
                json_kind(&other)
            ))),
            None => Err(FetchError::MalformedPayload("data field missing".to_string())),
        },
        other => Err(FetchError::MalformedPayload(format!(
            "payload is {} instead of an object",
            json_kind(&other)
        ))),
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

/// HTTP client for the upstream price-list API
pub struct UpstreamClient {
    http_client: reqwest::Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, FetchError> {
        let missing: Vec<&str> = [
            ("url", config.url.as_str()),
            ("username", config.username.as_str()),
            ("api key", config.api_key.as_str()),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
        if !missing.is_empty() {
            return Err(FetchError::ConfigurationMissing(missing.join(", ")));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Issue one signed `pricelist` call
    pub async fn fetch_price_list(&self) -> Result<Vec<Value>, FetchError> {
        let request = PriceListRequest {
            command: PRICELIST_COMMAND,
            username: &self.config.username,
            sign: sign(&self.config.username, &self.config.api_key, PRICELIST_COMMAND),
        };

        let started = Instant::now();
        let response = self
            .http_client
            .post(&self.config.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() || e.is_request() {
                    error!(error = %e, "No API response received");
                    FetchError::Unavailable(e.to_string())
                } else {
                    error!(error = %e, "Error in API request setup");
                    FetchError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!(error = %e, "Failed reading API response body");
            FetchError::Unavailable(e.to_string())
        })?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            error!(status = status.as_u16(), body = %body, "API error response");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let records = parse_payload(&body).map_err(|e| {
            warn!(error = %e, "Unexpected API response structure");
            e
        })?;

        info!(
            records = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched upstream price list"
        );

        Ok(records)
    }
}

#[async_trait]
impl PriceSource for UpstreamClient {
    async fn fetch_records(&self) -> Result<Arc<Vec<Value>>, FetchError> {
        self.fetch_price_list().await.map(Arc::new)
    }

    fn describe(&self) -> SourceInfo {
        SourceInfo {
            host: reqwest::Url::parse(&self.config.url)
                .ok()
                .and_then(|url| url.host_str().map(str::to_string)),
            timeout_ms: Some(self.config.timeout.as_millis() as u64),
            coalesced: false,
        }
    }
}

/// A price-list fetch that any number of callers can await
type Flight = Shared<BoxFuture<'static, Result<Arc<Vec<Value>>, FetchError>>>;

/// Single-flight wrapper around a [`PriceSource`].
///
/// Callers arriving while a fetch is in flight await that fetch and receive
/// its outcome, failures included. A caller arriving after it finished starts
/// a new one, so no result outlives the request that triggered it.
pub struct Coalesced<S> {
    inner: Arc<S>,
    in_flight: Mutex<Option<Flight>>,
}

impl<S: PriceSource + 'static> Coalesced<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner: Arc::new(inner),
            in_flight: Mutex::new(None),
        }
    }

    /// Join the running fetch or start a new one
    async fn flight(&self) -> Flight {
        let mut slot = self.in_flight.lock().await;
        if let Some(flight) = slot.as_ref() {
            if flight.peek().is_none() {
                debug!("Joining in-flight price list fetch");
                return flight.clone();
            }
        }

        let inner = Arc::clone(&self.inner);
        let flight = async move { inner.fetch_records().await }.boxed().shared();
        *slot = Some(flight.clone());
        flight
    }
}

#[async_trait]
impl<S: PriceSource + 'static> PriceSource for Coalesced<S> {
    async fn fetch_records(&self) -> Result<Arc<Vec<Value>>, FetchError> {
        // The slot lock is released before the fetch is awaited
        let flight = self.flight().await;
        flight.await
    }

    fn describe(&self) -> SourceInfo {
        SourceInfo {
            coalesced: true,
            ..self.inner.describe()
        }
    }
}
