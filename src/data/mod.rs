//! Core data models for artgrid
//!
//! This module contains the artwork record type, the errors raised while
//! fetching records, and the [`CollectionSource`] seam between the record
//! cache and the remote collection API.

pub mod artic;
#[cfg(test)]
pub(crate) mod fake;

pub use artic::ArticClient;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Base URL of the IIIF image service serving artwork images
pub const IMAGE_BASE_URL: &str = "https://www.artic.edu/iiif/2";

/// Placeholder shown for missing artist or date information
pub const NOT_AVAILABLE: &str = "N/A";

/// One artwork's display metadata as returned by the collection API
///
/// Field names follow the API so the same representation is used on the
/// wire and in the cache slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    /// Identifier assigned by the collection
    pub id: u64,
    /// Artwork title
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// IIIF image identifier, absent for artworks without a public image
    #[serde(default)]
    pub image_id: Option<String>,
    /// Artist name with nationality and life dates
    #[serde(default)]
    pub artist_display: Option<String>,
    /// Human-readable creation date
    #[serde(default)]
    pub date_display: Option<String>,
}

impl Artwork {
    /// Title to display, falling back to "Untitled"
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    /// Artist to display, falling back to "N/A"
    pub fn display_artist(&self) -> &str {
        self.artist_display.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Date to display, falling back to "N/A"
    pub fn display_date(&self) -> &str {
        self.date_display.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// URL of an 843px wide rendition of the artwork image
    pub fn image_url(&self) -> Option<String> {
        self.image_id.as_deref().map(image_url)
    }
}

/// Builds the IIIF URL for an image identifier
pub fn image_url(image_id: &str) -> String {
    format!("{}/{}/full/843,/0/default.jpg", IMAGE_BASE_URL, image_id)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Errors that can occur when fetching artwork records
#[derive(Debug, Error)]
pub enum FetchError {
    /// The collection reports no items at all
    #[error("The collection is empty")]
    EmptyCollection,

    /// The API answered with a non-success status
    #[error("API returned HTTP {0}")]
    HttpStatus(StatusCode),

    /// The request could not be sent or its body could not be read
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

impl FetchError {
    /// Whether this is a transport-level failure (status or network)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpStatus(_) | Self::RequestFailed(_))
    }
}

/// A remote collection of artworks
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Number of items in the collection
    async fn total_count(&self) -> Result<u64, FetchError>;

    /// Fetches the artworks with the given ids; unknown ids are omitted
    async fn fetch_by_ids(&self, ids: &[u64]) -> Result<Vec<Artwork>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artwork() -> Artwork {
        Artwork {
            id: 27992,
            title: "A Sunday on La Grande Jatte - 1884".to_string(),
            image_id: Some("1adf2696-8489-499b-cad2-821d7fde4b33".to_string()),
            artist_display: Some("Georges Seurat\nFrench, 1859-1891".to_string()),
            date_display: Some("1884-86".to_string()),
        }
    }

    #[test]
    fn test_image_url_format() {
        assert_eq!(
            artwork().image_url().as_deref(),
            Some("https://www.artic.edu/iiif/2/1adf2696-8489-499b-cad2-821d7fde4b33/full/843,/0/default.jpg")
        );
    }

    #[test]
    fn test_image_url_none_without_image_id() {
        let art = Artwork {
            image_id: None,
            ..artwork()
        };
        assert!(art.image_url().is_none());
    }

    #[test]
    fn test_display_fallbacks() {
        let art = Artwork {
            title: String::new(),
            artist_display: None,
            date_display: None,
            ..artwork()
        };
        assert_eq!(art.display_title(), "Untitled");
        assert_eq!(art.display_artist(), "N/A");
        assert_eq!(art.display_date(), "N/A");
    }

    #[test]
    fn test_deserialize_with_nulls() {
        let json = r#"{"id": 5, "title": null, "image_id": null, "artist_display": null, "date_display": null}"#;
        let art: Artwork = serde_json::from_str(json).expect("Nulls should be accepted");

        assert_eq!(art.id, 5);
        assert_eq!(art.display_title(), "Untitled");
        assert!(art.image_id.is_none());
        assert_eq!(art.display_artist(), "N/A");
    }

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let art: Artwork = serde_json::from_str(r#"{"id": 9, "title": "Nighthawks"}"#)
            .expect("Missing optional fields should be accepted");
        assert_eq!(art.title, "Nighthawks");
        assert!(art.date_display.is_none());
    }

    #[test]
    fn test_transport_classification() {
        assert!(FetchError::HttpStatus(StatusCode::BAD_GATEWAY).is_transport());
        assert!(!FetchError::EmptyCollection.is_transport());
    }
}
