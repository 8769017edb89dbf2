//! REST client for the customer API.
//!
//! # Endpoints
//!
//! | Method   | Path                  | Body            | Response        |
//! |----------|-----------------------|-----------------|-----------------|
//! | `GET`    | `/api/customers`      | -               | `[Customer]`    |
//! | `GET`    | `/api/customers/{id}` | -               | `Customer`      |
//! | `POST`   | `/api/customers`      | `CustomerDraft` | `Customer`      |
//! | `PUT`    | `/api/customers/{id}` | `CustomerDraft` | 200/204         |
//! | `DELETE` | `/api/customers/{id}` | -               | 200/204         |
//!
//! A 404 on an id-addressed request maps to [`RepositoryError::NotFound`];
//! every other failure is a transport error.

mod customers;

use std::sync::Arc;

use custdesk_core::CustomerId;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use url::Url;

use crate::config::ClientConfig;
use crate::repository::RepositoryError;

/// Collection path, relative to the configured base URL.
const CUSTOMERS_PATH: &str = "api/customers";

/// Customer REST API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct CustomerClient {
    inner: Arc<CustomerClientInner>,
}

struct CustomerClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CustomerClient {
    /// Create a client for the configured API.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, RepositoryError> {
        Self::with_base_url(config.api_url.clone())
    }

    /// Create a client for an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn with_base_url(base_url: Url) -> Result<Self, RepositoryError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(CustomerClientInner {
                client,
                base_url: with_trailing_slash(base_url),
            }),
        })
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// URL of the collection or of one record.
    fn url(&self, id: Option<&CustomerId>) -> Result<Url, RepositoryError> {
        let mut url = self
            .inner
            .base_url
            .join(CUSTOMERS_PATH)
            .map_err(|e| RepositoryError::Parse(format!("Invalid request URL: {e}")))?;

        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|()| RepositoryError::Parse("Base URL cannot hold a path".to_string()))?
                .push(id.as_str());
        }

        Ok(url)
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        id: Option<&CustomerId>,
    ) -> Result<T, RepositoryError> {
        let url = self.url(id)?;
        let response = self.inner.client.get(url).send().await?;
        Self::handle_response(response, id).await
    }

    /// Execute a POST request and decode the JSON body.
    async fn post_json<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        body: &B,
    ) -> Result<T, RepositoryError> {
        let url = self.url(None)?;
        let response = self.inner.client.post(url).json(body).send().await?;
        Self::handle_response(response, None).await
    }

    /// Execute a PUT request, ignoring any response body.
    async fn put_json<B: serde::Serialize + Sync>(
        &self,
        id: &CustomerId,
        body: &B,
    ) -> Result<(), RepositoryError> {
        let url = self.url(Some(id))?;
        let response = self.inner.client.put(url).json(body).send().await?;
        Self::handle_empty(response, id).await
    }

    /// Execute a DELETE request, ignoring any response body.
    async fn send_delete(&self, id: &CustomerId) -> Result<(), RepositoryError> {
        let url = self.url(Some(id))?;
        let response = self.inner.client.delete(url).send().await?;
        Self::handle_empty(response, id).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        id: Option<&CustomerId>,
    ) -> Result<T, RepositoryError> {
        if response.status().is_success() {
            return response
                .json()
                .await
                .map_err(|e| RepositoryError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response, id).await)
    }

    /// Accept any success status (200, 204) without reading the body.
    async fn handle_empty(
        response: reqwest::Response,
        id: &CustomerId,
    ) -> Result<(), RepositoryError> {
        if response.status().is_success() {
            return Ok(());
        }

        Err(Self::parse_error(response, Some(id)).await)
    }

    /// Parse error response from the API.
    async fn parse_error(response: reqwest::Response, id: Option<&CustomerId>) -> RepositoryError {
        let status = response.status().as_u16();

        // Only id-addressed requests can be "not found"
        if status == 404 {
            if let Some(id) = id {
                return RepositoryError::NotFound(id.clone());
            }
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        RepositoryError::Api { status, message }
    }
}

impl std::fmt::Debug for CustomerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Ensure relative joins append to the base path instead of replacing its last segment.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
