//! Extension points around scoring and cleanup.
//!
//! Every hook has a default that leaves behavior untouched, so a service
//! built without any of them scores with the built-in formula, trusts its
//! caller and exposes the full whitelist. Closures with the matching
//! signature implement the filter traits directly.

use dbsweep_domain::{CleanupResult, DatabaseStats};

use super::cleanup::CleanupWhitelist;

/// Replaces the computed health score.
///
/// Runs after the built-in scorer has capped its result. The returned value
/// is reported as-is.
pub trait HealthScoreFilter: Send + Sync {
    fn filter(&self, score: i64, stats: &DatabaseStats) -> i64;
}

impl<F> HealthScoreFilter for F
where
    F: Fn(i64, &DatabaseStats) -> i64 + Send + Sync,
{
    fn filter(&self, score: i64, stats: &DatabaseStats) -> i64 {
        self(score, stats)
    }
}

/// Leaves the score unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityScoreFilter;

impl HealthScoreFilter for IdentityScoreFilter {
    fn filter(&self, score: i64, _stats: &DatabaseStats) -> i64 {
        score
    }
}

/// Edits the cleanup whitelist once, when the service is built.
///
/// A filter may remove actions or register aliases for existing actions. It
/// cannot introduce new behavior: every entry still resolves to a
/// `CleanupAction`.
pub trait WhitelistFilter: Send + Sync {
    fn filter(&self, whitelist: &mut CleanupWhitelist);
}

impl<F> WhitelistFilter for F
where
    F: Fn(&mut CleanupWhitelist) + Send + Sync,
{
    fn filter(&self, whitelist: &mut CleanupWhitelist) {
        self(whitelist);
    }
}

/// Observes cleanup invocations that passed the read-only gate.
///
/// `before_cleanup` receives the raw action name, before whitelist
/// resolution, so rejected names are observed too.
pub trait CleanupObserver: Send + Sync {
    fn before_cleanup(&self, _action: &str) {}

    fn after_cleanup(&self, _action: &str, _result: &CleanupResult) {}
}

/// Decides whether the current caller may mutate the store.
pub trait Authorizer: Send + Sync {
    fn is_authorized(&self) -> bool;
}

impl<F> Authorizer for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_authorized(&self) -> bool {
        self()
    }
}

/// Trusts every caller; authentication happens upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustCaller;

impl Authorizer for TrustCaller {
    fn is_authorized(&self) -> bool {
        true
    }
}
