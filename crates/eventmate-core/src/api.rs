//! HTTP client for the Event API.
//!
//! Two endpoints are used:
//! - `GET  {base}/api/events`      list all events
//! - `PUT  {base}/api/events/{id}` partial update, body `{"slot": n}`

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::events::Event;

/// Category of an API failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Connection, TLS or body-read failure.
    Transport,
    /// The request exceeded the configured timeout.
    Timeout,
    /// Non-2xx response.
    HttpStatus,
    /// The response was 2xx but not an array of events.
    Malformed,
}

/// Error returned by `ApiClient` operations.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Classifies a reqwest failure.
    pub fn transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::new(ApiErrorKind::Timeout, format!("Request timed out: {err}"));
        }
        Self::new(ApiErrorKind::Transport, format!("Request failed: {err}"))
    }

    pub fn http_status(status: u16, body: &str) -> Self {
        let details = (!body.is_empty()).then(|| body.to_string());
        Self {
            kind: ApiErrorKind::HttpStatus,
            message: format!("HTTP {status}"),
            details,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Malformed, message)
    }

    pub fn is_malformed(&self) -> bool {
        self.kind == ApiErrorKind::Malformed
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Serialize)]
struct SlotUpdate {
    slot: u32,
}

/// Event API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the URL is not an absolute http(s) URL or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { base_url, http })
    }

    /// Creates a client from the loaded configuration.
    ///
    /// # Errors
    /// See [`ApiClient::new`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, config.request_timeout())
    }

    /// Fetches every event.
    ///
    /// A 2xx body that is not a JSON array of events is `Malformed`;
    /// everything else that goes wrong is `Transport`, `Timeout` or
    /// `HttpStatus`.
    ///
    /// # Errors
    /// Returns an `ApiError` as described above.
    pub async fn list_events(&self) -> ApiResult<Vec<Event>> {
        let url = self.endpoint(None);
        debug!(%url, "listing events");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::transport(&e))?;
        if !status.is_success() {
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        let events = parse_event_list(&body)?;
        debug!(count = events.len(), "events listed");
        Ok(events)
    }

    /// Sends the new slot count for one event. The response body is ignored.
    ///
    /// # Errors
    /// Returns `Transport`, `Timeout` or `HttpStatus`.
    pub async fn update_slot(&self, event_id: &str, slot: u32) -> ApiResult<()> {
        let url = self.endpoint(Some(event_id));
        debug!(%url, slot, "updating slot");

        let response = self
            .http
            .put(url)
            .json(&SlotUpdate { slot })
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(status.as_u16(), &body));
        }
        Ok(())
    }

    /// Builds `{base}/api/events[/{id}]`, percent-encoding the id.
    fn endpoint(&self, event_id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        // parse_base_url guarantees a base URL, so this cannot fail.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("api").push("events");
            if let Some(id) = event_id {
                segments.push(id);
            }
        }
        url
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid API URL: {raw}"))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("Invalid API URL: {raw} (expected an http or https URL)");
    }
    Ok(url)
}

/// Decodes a list response body.
///
/// # Errors
/// Returns `Malformed` if the body is not JSON, not an array, or holds
/// records that are not events.
pub fn parse_event_list(body: &str) -> ApiResult<Vec<Event>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::malformed(format!("Response is not JSON: {e}")))?;
    if !value.is_array() {
        return Err(ApiError::malformed("Expected an array of events"));
    }
    serde_json::from_value(value)
        .map_err(|e| ApiError::malformed(format!("Invalid event record: {e}")))
}
