//! Key-value storage for persisted application state
//!
//! The record cache talks to storage only through [`KeyValueStore`], so it can
//! run against the on-disk [`FileStore`] in the application and against the
//! in-memory [`MemoryStore`] in tests or when persistence is disabled.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::io;

/// A byte-oriented key-value store with a single value per key
pub trait KeyValueStore: Send + Sync {
    /// Returns the bytes stored under `key`, or `None` if nothing is stored
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &[u8]) -> io::Result<()>;
}
