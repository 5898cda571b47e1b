//! Time-boxed cache of randomly sampled artwork records
//!
//! This module provides the record cache that serves a batch of artworks from
//! a single persisted slot while it is fresh, and refills the slot with a new
//! random batch from the collection once it has expired.

mod records;

pub use records::{random_ids, CacheEntry, RecordCache, BATCH_SIZE, CACHE_KEY, CACHE_TTL_MS};
