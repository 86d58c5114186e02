//! HTTP client for the SWAPI relay.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use super::{LIST_LIMIT, ResourceKind, SwapiError};

/// Client for the Star Wars API.
///
/// Cheaply cloneable; the underlying `reqwest::Client` keeps a shared
/// connection pool.
#[derive(Clone)]
pub struct SwapiClient {
    inner: Arc<SwapiClientInner>,
}

struct SwapiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl SwapiClient {
    /// Create a new client for `base_url` (e.g. `https://www.swapi.tech/api`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: Arc::new(SwapiClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
            }),
        }
    }

    /// Base URL without a trailing slash. Favorites build their urls from it.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Fetch the first page of a collection, `LIST_LIMIT` entries long.
    ///
    /// # Errors
    ///
    /// Returns `SwapiError` if the upstream is unreachable or does not answer with JSON.
    #[instrument(skip(self))]
    pub async fn list(&self, kind: ResourceKind) -> Result<Value, SwapiError> {
        let url = format!("{}/{kind}?page=1&limit={LIST_LIMIT}", self.inner.base_url);
        self.fetch(&url).await
    }

    /// Fetch a single resource by id.
    ///
    /// # Errors
    ///
    /// Returns `SwapiError` if the upstream is unreachable or does not answer with JSON.
    #[instrument(skip(self))]
    pub async fn get(&self, kind: ResourceKind, id: u32) -> Result<Value, SwapiError> {
        let url = format!("{}/{kind}/{id}", self.inner.base_url);
        self.fetch(&url).await
    }

    /// GET `url` and parse the body as JSON, whatever the status code.
    async fn fetch(&self, url: &str) -> Result<Value, SwapiError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // The body is relayed even for error statuses (e.g. SWAPI's 404 `{"message": "not found"}`)
        if !status.is_success() {
            tracing::warn!(%status, url, "SWAPI returned non-success status");
        }

        let body = response.text().await?;
        let value = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                %status,
                body = %body.chars().take(200).collect::<String>(),
                "SWAPI returned a non-JSON body"
            );
            SwapiError::Parse(e)
        })?;

        debug!(%status, url, "SWAPI response relayed");
        Ok(value)
    }
}
