//! Database bloat inspection: diagnostics, health scoring and cleanup.

pub mod cleanup;
pub mod health;
pub mod hooks;
pub mod ports;
pub mod read_only;
pub mod service;
pub mod stats_collector;

pub use cleanup::{CleanupRegistry, CleanupWhitelist};
pub use health::{builtin_score, compute_penalties, HealthScorer};
pub use hooks::{
    Authorizer, CleanupObserver, HealthScoreFilter, IdentityScoreFilter, TrustCaller,
    WhitelistFilter,
};
pub use ports::{BloatStore, CommentStatus, DisabledObjectCache, MetaKind, ObjectCache, PostKind};
pub use read_only::{ReadOnlyGate, ReadOnlySource, SharedReadOnlyFlag, StaticReadOnly};
pub use service::{InspectorService, InspectorServiceBuilder};
pub use stats_collector::StatsCollector;
