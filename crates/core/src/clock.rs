//! Wall-clock abstraction for expiry checks.
//!
//! Transient expiry compares stored UNIX timestamps against "now". Routing
//! that read through a trait keeps the collector and the cleanup registry
//! deterministic under test.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Clock abstraction for testability
pub trait Clock: Send + Sync + 'static {
    /// Seconds since the UNIX epoch.
    fn unix_timestamp(&self) -> i64;
}

/// Real system clock implementation for production use
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Manually driven clock for tests.
///
/// Clones share the same instant, so a test can hold one handle and move
/// time for every component that received another.
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    now: Arc<AtomicI64>,
}

impl FixedClock {
    /// Create a clock frozen at `timestamp`.
    pub fn at(timestamp: i64) -> Self {
        Self { now: Arc::new(AtomicI64::new(timestamp)) }
    }

    /// Jump to an absolute timestamp.
    pub fn set(&self, timestamp: i64) {
        self.now.store(timestamp, Ordering::SeqCst);
    }

    /// Move forward by `seconds`.
    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn unix_timestamp(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
