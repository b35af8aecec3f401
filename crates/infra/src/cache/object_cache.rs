//! In-process object cache backed by moka.
//!
//! Stands in for an external object cache (Redis, Memcached) so the
//! `object_cache` cleanup has a real backend to flush.
//!
//! # Example
//! ```rust
//! use dbsweep_core::inspector::ObjectCache;
//! use dbsweep_infra::cache::MokaObjectCache;
//!
//! let cache = MokaObjectCache::new(1_000);
//! cache.insert("alloptions", "{...}");
//! assert!(cache.flush().unwrap());
//! assert_eq!(cache.get("alloptions"), None);
//! ```

use dbsweep_core::inspector::ObjectCache;
use dbsweep_domain::Result;
use moka::sync::Cache;
use tracing::info;

/// Thread-safe object cache with capacity-bounded eviction.
#[derive(Clone)]
pub struct MokaObjectCache {
    cache: Cache<String, String>,
}

impl MokaObjectCache {
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self { cache: Cache::builder().max_capacity(max_capacity).build() }
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.cache.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.cache.get(key)
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl ObjectCache for MokaObjectCache {
    fn is_enabled(&self) -> bool {
        true
    }

    fn flush(&self) -> Result<bool> {
        let entries = self.entry_count();
        self.cache.invalidate_all();
        info!(entries, "object cache flushed");
        Ok(true)
    }
}
