//! Resource client for the warehouse backend REST API.
//!
//! One [`ApiClient`] carries the HTTP connection pool, the session cookie
//! jar, and the base URL. Per-resource methods live in their own modules
//! as impl blocks on the client:
//!
//! - [`warehouses`] - warehouse CRUD
//! - [`products`] - product CRUD and stock operations (query/add/decrease/transfer)
//! - [`orders`] - order CRUD, status updates, cancellation
//! - [`reports`] - opaque spreadsheet downloads
//! - [`auth`] - login/logout/current-user
//!
//! # Contract
//!
//! Every write is a single request; there is no batching and no retry.
//! A non-2xx response becomes [`ApiError::Rejected`] carrying the server's
//! `detail`/`message` body field (or a generic `HTTP {status}` text), and
//! that error is the caller's sole failure signal.

pub mod auth;
pub mod orders;
pub mod products;
pub mod reports;
pub mod warehouses;

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ConsoleConfig;
use crate::error::ApiError;

/// Typed client for the warehouse backend.
///
/// Cheap to clone; clones share the connection pool and cookie jar, so a
/// login performed through one clone authenticates them all.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

/// Generic `{status, message}` envelope returned by delete endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MutationOutcome {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl MutationOutcome {
    /// Whether the backend reported the mutation as applied.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

impl ApiClient {
    /// Create a client for the configured backend.
    ///
    /// The cookie store is enabled so the backend's session cookie set at
    /// login is replayed on subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying HTTP client fails to
    /// build.
    pub fn new(config: &ConsoleConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.clone(),
            }),
        })
    }

    /// Base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Execute a GET request and parse the JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.inner.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a GET request with query parameters.
    pub(crate) async fn get_query<T: DeserializeOwned, Q: serde::Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute a POST request without a body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.inner.client.post(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a PATCH request with a JSON body.
    pub(crate) async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Execute a DELETE request and parse the JSON response.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.inner.client.delete(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a GET request for an opaque binary body.
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.inner.client.get(self.url(path)).send().await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Parse a 2xx JSON body, or convert a non-2xx response into a rejection.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Build the rejection error for a non-2xx response.
    ///
    /// Prefers the body's `detail` field, then `message`, then falls back
    /// to a generic status-based text. The offline-vs-rejected distinction
    /// is not preserved beyond the variant itself.
    async fn rejection(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                ["detail", "message"]
                    .iter()
                    .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(String::from))
            })
            .unwrap_or_else(|| format!("HTTP {status}"));

        ApiError::Rejected { status, message }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}
