//! # dbsweep Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (`BloatStore`, `ObjectCache`, `Clock`)
//! - Extension hooks around scoring and cleanup
//! - The statistics collector, health scorer and cleanup registry
//! - `InspectorService`, the facade the application layer calls
//!
//! ## Architecture Principles
//! - Only depends on `dbsweep-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod clock;
pub mod inspector;

pub use clock::{Clock, FixedClock, SystemClock};
pub use inspector::{
    BloatStore, CleanupObserver, CleanupWhitelist, InspectorService, InspectorServiceBuilder,
    ObjectCache, ReadOnlyGate, ReadOnlySource,
};
