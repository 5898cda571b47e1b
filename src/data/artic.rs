//! Art Institute of Chicago collection API client
//!
//! Implements [`CollectionSource`] against the public artworks endpoint.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{Artwork, CollectionSource, FetchError};

/// Base URL for the artworks collection endpoint
const ARTWORKS_BASE_URL: &str = "https://api.artic.edu/api/v1/artworks";

/// Field projection requested for batch fetches
const ARTWORK_FIELDS: &str = "id,title,image_id,artist_display,date_display";

/// Per-request timeout applied by the HTTP client
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response of the `limit=0` metadata request
#[derive(Debug, Deserialize)]
struct MetadataResponse {
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    total: u64,
}

/// Response of the batch request
#[derive(Debug, Deserialize)]
struct BatchResponse {
    #[serde(default)]
    data: Vec<Artwork>,
}

/// Client for the Art Institute of Chicago artworks API
#[derive(Debug, Clone)]
pub struct ArticClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl Default for ArticClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticClient {
    /// Creates a new ArticClient with default settings
    pub fn new() -> Self {
        let http_client = build_http_client(
            Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .user_agent(concat!("artgrid/", env!("CARGO_PKG_VERSION"))),
        );
        Self {
            http_client,
            base_url: ARTWORKS_BASE_URL.to_string(),
        }
    }

    /// Points the client at a different collection endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn metadata_url(&self) -> String {
        format!("{}?limit=0", self.base_url)
    }

    fn batch_url(&self, ids: &[u64]) -> String {
        let csv = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!("{}?ids={}&fields={}", self.base_url, csv, ARTWORK_FIELDS)
    }

    /// Sends a GET request and decodes a successful JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(%url, "requesting collection endpoint");
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status));
        }

        Ok(response.json::<T>().await?)
    }
}

/// Builds the HTTP client, falling back to reqwest defaults if the builder fails
fn build_http_client(builder: ClientBuilder) -> Client {
    builder.build().unwrap_or_else(|e| {
        warn!(error = %e, "failed to configure HTTP client, falling back to defaults without timeout");
        Client::new()
    })
}

#[async_trait]
impl CollectionSource for ArticClient {
    async fn total_count(&self) -> Result<u64, FetchError> {
        let metadata: MetadataResponse = self.get_json(&self.metadata_url()).await?;
        Ok(metadata.pagination.total)
    }

    async fn fetch_by_ids(&self, ids: &[u64]) -> Result<Vec<Artwork>, FetchError> {
        let batch: BatchResponse = self.get_json(&self.batch_url(ids)).await?;
        Ok(batch.data)
    }
}
