//! HTTP handle for the hosted table store
//!
//! The store speaks a PostgREST-style dialect: one URL per table, row filters
//! as `column=op.value` query pairs, JSON bodies in and out. A single
//! `StoreClient` is built at startup from a validated [`StoreConfig`] and
//! shared for the life of the process.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use super::{ConfigError, StoreConfig};
use crate::repository::RepositoryError;

/// Shared connection to the table store
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: Client,
    rest_url: String,
}

impl StoreClient {
    /// Build the store handle from a validated configuration
    pub fn connect(config: &StoreConfig) -> Result<Self, ConfigError> {
        let mut api_key = HeaderValue::from_str(&config.key).map_err(|_| ConfigError::InvalidKey)?;
        api_key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.key))
            .map_err(|_| ConfigError::InvalidKey)?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            rest_url: config.rest_url(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    /// Request inserting one row and asking for the stored row back
    pub fn insert_request<B: Serialize + ?Sized>(&self, table: &str, row: &B) -> RequestBuilder {
        self.http
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(row)
    }

    /// Request selecting rows that match the given filter pairs
    pub fn select_request(&self, table: &str, filters: &[(String, String)]) -> RequestBuilder {
        self.http.get(self.table_url(table)).query(filters)
    }

    /// Request deleting rows that match the given filter pairs
    pub fn delete_request(&self, table: &str, filters: &[(String, String)]) -> RequestBuilder {
        self.http.delete(self.table_url(table)).query(filters)
    }

    /// Send a request and decode its JSON body
    pub async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, RepositoryError> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| RepositoryError::Decode(e.to_string()))
    }

    /// Send a request whose body is not needed
    pub async fn execute(&self, request: RequestBuilder) -> Result<(), RepositoryError> {
        self.send(request).await.map(|_| ())
    }

    /// Check that the REST root answers
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        debug!("Probing table store at {}", self.rest_url);
        self.execute(self.http.get(format!("{}/", self.rest_url))).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, RepositoryError> {
        let response = request.send().await.map_err(|e| {
            error!("Table store request failed: {}", e);
            RepositoryError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        error!("Table store answered {}: {}", status, message);
        Err(RepositoryError::Status {
            status: status.as_u16(),
            message,
        })
    }
}
