//! Credify client implementation.

use crate::error::ApiError;
use crate::wire::{CheckRequest, ClaimPayload, HealthStatus, VerificationPayload};
use credify_domain::{Claim, VerificationResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Number of history records fetched when no limit is given
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Connection settings for [`CredifyClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root, e.g. `https://factcheck.example.com`
    pub base_url: String,
}

impl ClientConfig {
    /// Create a config pointing at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Credify SDK client
///
/// Every call is one request and one response: no retries, no timeout of its
/// own, no caching. The client holds no mutable state and can be shared.
#[derive(Debug, Clone)]
pub struct CredifyClient {
    base_url: Url,
    http: reqwest::Client,
}

impl CredifyClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    /// Create a client from explicit configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let raw = config.base_url.trim();
        let base_url =
            Url::parse(raw).map_err(|e| ApiError::invalid_base_url(raw, e))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::invalid_base_url(raw, "not a hierarchical URL"));
        }

        let http = reqwest::Client::builder().build()?;

        Ok(Self { base_url, http })
    }

    /// The service root this client talks to
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Submit a claim for verification (`POST /check`)
    pub async fn verify_claim(&self, text: &str) -> Result<VerificationResult, ApiError> {
        let url = self.endpoint(&["check"])?;
        let request = self
            .request(Method::POST, url)
            .json(&CheckRequest { text });

        let payload: VerificationPayload = self.send(request).await?;
        Ok(payload.into())
    }

    /// Fetch up to `limit` past records (`GET /history?limit=n`)
    ///
    /// Ordering (newest first) is whatever the service returns.
    pub async fn get_history(&self, limit: usize) -> Result<Vec<Claim>, ApiError> {
        let mut url = self.endpoint(&["history"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        let payload: Vec<ClaimPayload> = self.send(self.request(Method::GET, url)).await?;
        Ok(payload.into_iter().map(Claim::from).collect())
    }

    /// Fetch the most recent [`DEFAULT_HISTORY_LIMIT`] records
    pub async fn get_recent_history(&self) -> Result<Vec<Claim>, ApiError> {
        self.get_history(DEFAULT_HISTORY_LIMIT).await
    }

    /// Fetch one record (`GET /history/<id>`)
    ///
    /// A missing record surfaces as an [`ApiError`] carrying the service's
    /// status, normally 404.
    pub async fn get_history_detail(&self, id: &str) -> Result<Claim, ApiError> {
        let url = self.endpoint(&["history", id])?;

        let payload: ClaimPayload = self.send(self.request(Method::GET, url)).await?;
        Ok(payload.into())
    }

    /// Probe service health (`GET /`)
    pub async fn check_health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint(&[])?;
        self.send(self.request(Method::GET, url)).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::invalid_base_url(self.base_url.as_str(), "not a hierarchical URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "Sending request");
        self.http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Received response");

        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::decode(status.as_u16(), e))
    }
}
