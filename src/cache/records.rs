//! Record cache backed by a key-value store
//!
//! Provides a `RecordCache` that keeps the last fetched batch of artworks in a
//! single store slot together with its write timestamp.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::data::{Artwork, CollectionSource, FetchError};
use crate::store::KeyValueStore;

/// Store key of the single cache slot
pub const CACHE_KEY: &str = "artwork_cache";

/// Freshness window of the cache slot in milliseconds (1 hour)
pub const CACHE_TTL_MS: i64 = 60 * 60 * 1000;

/// Number of random ids requested per batch
pub const BATCH_SIZE: usize = 10;

/// Contents of the cache slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Milliseconds since the Unix epoch at which the entry was written
    pub timestamp: i64,
    /// The cached artworks, in fetch order
    pub data: Vec<Artwork>,
}

impl CacheEntry {
    /// Whether the entry is still within the TTL at `now`
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis().saturating_sub(self.timestamp) < CACHE_TTL_MS
    }

    /// Age of the entry at `now`, in milliseconds
    pub fn age_ms(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp_millis().saturating_sub(self.timestamp)
    }
}

/// Reasons the cache slot could not be used; always handled as a miss
#[derive(Debug, Error)]
enum CacheReadError {
    #[error("cache slot unreadable: {0}")]
    Io(#[from] io::Error),

    #[error("cache slot corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Serves artwork batches from a time-limited cache slot
///
/// A fresh slot is returned as-is with no network access. Otherwise the
/// collection size is queried, [`BATCH_SIZE`] random ids are drawn and the
/// resulting batch replaces the slot.
#[derive(Clone)]
pub struct RecordCache {
    source: Arc<dyn CollectionSource>,
    store: Arc<dyn KeyValueStore>,
}

impl RecordCache {
    /// Creates a RecordCache fetching from `source` and persisting to `store`
    pub fn new(source: Arc<dyn CollectionSource>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { source, store }
    }

    /// Returns a batch of artworks, from the cache while fresh
    pub async fn get_records(&self) -> Result<Vec<Artwork>, FetchError> {
        self.get_records_at(Utc::now()).await
    }

    /// Returns a batch of artworks as of `now`
    ///
    /// # Returns
    /// * `Ok(Vec<Artwork>)` - cached data if fresh, otherwise a new batch
    ///   (possibly shorter than `BATCH_SIZE` when some ids do not exist)
    /// * `Err(FetchError::EmptyCollection)` - the collection reports zero items
    /// * `Err(FetchError)` transport variants - a request failed or returned a
    ///   non-success status
    pub async fn get_records_at(&self, now: DateTime<Utc>) -> Result<Vec<Artwork>, FetchError> {
        if let Some(entry) = self.peek(now) {
            debug!(count = entry.data.len(), "cache hit");
            return Ok(entry.data);
        }

        let total = self.source.total_count().await?;
        if total == 0 {
            return Err(FetchError::EmptyCollection);
        }

        let ids = random_ids(&mut rand::rng(), total, BATCH_SIZE);
        debug!(total, ?ids, "fetching random batch");

        let data = self.source.fetch_by_ids(&ids).await?;
        info!(count = data.len(), "fetched artwork batch");

        let entry = CacheEntry {
            timestamp: now.timestamp_millis(),
            data,
        };
        if let Err(e) = self.write_entry(&entry) {
            warn!(error = %e, "failed to persist artwork cache");
        }

        Ok(entry.data)
    }

    /// Returns the cached entry if present and fresh at `now`
    ///
    /// Never touches the network. A missing, unreadable or corrupt slot
    /// yields `None`, as does an expired one.
    pub fn peek(&self, now: DateTime<Utc>) -> Option<CacheEntry> {
        let entry = match self.read_entry() {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!("cache miss: slot empty");
                return None;
            }
            Err(e) => {
                debug!(error = %e, "cache miss: ignoring slot");
                return None;
            }
        };

        if entry.is_fresh_at(now) {
            Some(entry)
        } else {
            debug!(age_ms = entry.age_ms(now), "cache miss: slot expired");
            None
        }
    }

    fn read_entry(&self) -> Result<Option<CacheEntry>, CacheReadError> {
        let Some(bytes) = self.store.get(CACHE_KEY)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn write_entry(&self, entry: &CacheEntry) -> io::Result<()> {
        let json = serde_json::to_vec(entry)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.store.set(CACHE_KEY, &json)
    }
}

/// Draws `count` ids uniformly from `1..=total`, independently
///
/// Duplicates are possible. Returns an empty list when `total` is zero.
pub fn random_ids<R: Rng + ?Sized>(rng: &mut R, total: u64, count: usize) -> Vec<u64> {
    if total == 0 {
        return Vec::new();
    }
    (0..count).map(|_| rng.random_range(1..=total)).collect()
}
