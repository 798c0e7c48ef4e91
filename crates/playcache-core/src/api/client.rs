//! REST client for the hosted content service.
//!
//! The backend exposes each collection as a PostgREST-style table under
//! `/rest/v1/{collection}`. Reads select whole collections ordered by id;
//! writes are issued by the settings flows and return the server's
//! representation of the affected row.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use tracing::debug;

use crate::models::{validate_collection, ContentRecord};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Path prefix the hosted service uses for its REST data API.
const REST_PATH: &str = "rest/v1";

/// Client for the hosted content service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ContentClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl ContentClient {
    pub fn new(service_url: &str, service_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: service_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH, collection)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert("apikey", header::HeaderValue::from_str(&self.service_key)?);
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", self.service_key))?,
        );
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Fetch the full collection for a record type.
    ///
    /// Exactly one attempt: the caller decides whether to fall back to the
    /// local store, never to retry here. Malformed responses are rejected
    /// before any record reaches a game view.
    pub async fn fetch_all<T: ContentRecord>(&self) -> Result<Vec<T>> {
        let url = format!("{}?select=*&order=id.asc", self.collection_url(T::COLLECTION));

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;

        let records: Vec<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", T::COLLECTION))?;

        validate_collection(&records).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        debug!(
            collection = T::COLLECTION,
            count = records.len(),
            "Fetched collection"
        );
        Ok(records)
    }

    /// Insert one record, returning the stored row.
    pub async fn insert<T: ContentRecord>(&self, record: &T) -> Result<T> {
        record.validate()?;
        let url = self.collection_url(T::COLLECTION);

        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;
        Self::single_row(response, T::COLLECTION).await
    }

    /// Update one record in place, matched by id, returning the stored row.
    pub async fn update<T: ContentRecord>(&self, record: &T) -> Result<T> {
        record.validate()?;
        let url = self.collection_url(T::COLLECTION);

        let response = self
            .client
            .patch(&url)
            .headers(self.auth_headers()?)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{}", record.id()))])
            .json(record)
            .send()
            .await
            .with_context(|| format!("Failed to send PATCH request to {}", url))?;

        let response = Self::check_response(response).await?;
        Self::single_row(response, T::COLLECTION).await
    }

    /// Delete one record by id.
    pub async fn delete<T: ContentRecord>(&self, id: i64) -> Result<()> {
        let url = self.collection_url(T::COLLECTION);

        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers()?)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await
            .with_context(|| format!("Failed to send DELETE request to {}", url))?;

        Self::check_response(response).await?;
        debug!(collection = T::COLLECTION, id, "Deleted record");
        Ok(())
    }

    /// The REST layer returns row representations as a one-element array.
    async fn single_row<T: ContentRecord>(
        response: reqwest::Response,
        collection: &'static str,
    ) -> Result<T> {
        let mut rows: Vec<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} representation", collection))?;

        match rows.pop() {
            Some(row) if rows.is_empty() => Ok(row),
            Some(_) => Err(ApiError::InvalidResponse(format!(
                "{}: write affected more than one row",
                collection
            ))
            .into()),
            None => Err(ApiError::InvalidResponse(format!(
                "{}: write returned no representation",
                collection
            ))
            .into()),
        }
    }
}
