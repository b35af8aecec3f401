//! Read-only gate consulted before every mutation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Supplies the current read-only state.
///
/// Implementations are queried on every call and must not cache, so the
/// gate can be flipped between requests.
pub trait ReadOnlySource: Send + Sync {
    fn is_read_only(&self) -> bool;
}

/// Fixed value decided at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticReadOnly(pub bool);

impl ReadOnlySource for StaticReadOnly {
    fn is_read_only(&self) -> bool {
        self.0
    }
}

/// Runtime toggle shared between the gate and whoever flips it.
#[derive(Debug, Clone, Default)]
pub struct SharedReadOnlyFlag {
    flag: Arc<AtomicBool>,
}

impl SharedReadOnlyFlag {
    pub fn new(initial: bool) -> Self {
        Self { flag: Arc::new(AtomicBool::new(initial)) }
    }

    pub fn set(&self, read_only: bool) {
        self.flag.store(read_only, Ordering::SeqCst);
    }
}

impl ReadOnlySource for SharedReadOnlyFlag {
    fn is_read_only(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Single switch that disables every cleanup action.
#[derive(Clone)]
pub struct ReadOnlyGate {
    source: Arc<dyn ReadOnlySource>,
}

impl ReadOnlyGate {
    pub fn new(source: Arc<dyn ReadOnlySource>) -> Self {
        Self { source }
    }

    /// Current state, read from the source on every call.
    pub fn is_read_only(&self) -> bool {
        self.source.is_read_only()
    }
}

impl Default for ReadOnlyGate {
    fn default() -> Self {
        Self::new(Arc::new(StaticReadOnly(false)))
    }
}

impl std::fmt::Debug for ReadOnlyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadOnlyGate").field("read_only", &self.is_read_only()).finish()
    }
}
