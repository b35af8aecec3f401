//! Shared test helpers for `dbsweep-core` integration tests.
//!
//! These helpers provide an in-memory store and lightweight hook fakes so
//! that service tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod store;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dbsweep_core::inspector::{CleanupObserver, ObjectCache};
use dbsweep_domain::{CleanupResult, Result};

pub use store::MemoryBloatStore;

/// Fixed "now" used by every test.
pub const NOW: i64 = 1_700_000_000;

/// Records every observer callback in order.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl CleanupObserver for RecordingObserver {
    fn before_cleanup(&self, action: &str) {
        self.events.lock().unwrap().push(format!("before:{action}"));
    }

    fn after_cleanup(&self, action: &str, result: &CleanupResult) {
        self.events.lock().unwrap().push(format!("after:{action}:{}", result.deleted));
    }
}

/// Object cache fake counting flushes.
#[derive(Default)]
pub struct CountingCache {
    flushes: AtomicUsize,
}

impl CountingCache {
    pub fn flushes(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

impl ObjectCache for CountingCache {
    fn is_enabled(&self) -> bool {
        true
    }

    fn flush(&self) -> Result<bool> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

pub fn arc<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
