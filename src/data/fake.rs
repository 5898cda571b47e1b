//! Scripted collection source for tests

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{Artwork, CollectionSource, FetchError};

/// A `CollectionSource` with canned answers that records every call
pub(crate) struct FakeSource {
    total: Result<u64, StatusCode>,
    batch: Mutex<Result<Vec<Artwork>, StatusCode>>,
    metadata_calls: AtomicUsize,
    batch_calls: AtomicUsize,
    requested_ids: Mutex<Vec<Vec<u64>>>,
}

impl FakeSource {
    pub(crate) fn new(total: u64, batch: Vec<Artwork>) -> Self {
        Self::scripted(Ok(total), Ok(batch))
    }

    pub(crate) fn failing_metadata(status: StatusCode) -> Self {
        Self::scripted(Err(status), Ok(Vec::new()))
    }

    pub(crate) fn failing_batch(total: u64, status: StatusCode) -> Self {
        Self::scripted(Ok(total), Err(status))
    }

    fn scripted(total: Result<u64, StatusCode>, batch: Result<Vec<Artwork>, StatusCode>) -> Self {
        Self {
            total,
            batch: Mutex::new(batch),
            metadata_calls: AtomicUsize::new(0),
            batch_calls: AtomicUsize::new(0),
            requested_ids: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the answer of subsequent batch requests
    pub(crate) fn set_batch(&self, batch: Vec<Artwork>) {
        *self.batch.lock().unwrap() = Ok(batch);
    }

    pub(crate) fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    /// Total number of remote requests made so far
    pub(crate) fn requests(&self) -> usize {
        self.metadata_calls() + self.batch_calls()
    }

    /// Id lists passed to each batch request, in call order
    pub(crate) fn requested_ids(&self) -> Vec<Vec<u64>> {
        self.requested_ids.lock().unwrap().clone()
    }
}

#[async_trait]
impl CollectionSource for FakeSource {
    async fn total_count(&self) -> Result<u64, FetchError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.total.map_err(FetchError::HttpStatus)
    }

    async fn fetch_by_ids(&self, ids: &[u64]) -> Result<Vec<Artwork>, FetchError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_ids.lock().unwrap().push(ids.to_vec());
        self.batch.lock().unwrap().clone().map_err(FetchError::HttpStatus)
    }
}

/// Builds `n` distinct artworks with ids starting at `first_id`
pub(crate) fn artworks(first_id: u64, n: usize) -> Vec<Artwork> {
    (0..n as u64)
        .map(|i| Artwork {
            id: first_id + i,
            title: format!("Artwork {}", first_id + i),
            image_id: Some(format!("img-{}", first_id + i)),
            artist_display: Some("Unknown Artist".to_string()),
            date_display: None,
        })
        .collect()
}
