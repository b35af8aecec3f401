//! Inspector service - the facade callers talk to.

use std::sync::Arc;

use dbsweep_domain::{CleanupAction, CleanupResult, DatabaseStats, PenaltyBreakdown};
use tracing::{debug, info, warn};

use super::cleanup::{CleanupRegistry, CleanupWhitelist};
use super::health::{compute_penalties, HealthScorer};
use super::hooks::{
    Authorizer, CleanupObserver, HealthScoreFilter, IdentityScoreFilter, TrustCaller,
    WhitelistFilter,
};
use super::ports::{BloatStore, DisabledObjectCache, ObjectCache};
use super::read_only::{ReadOnlyGate, ReadOnlySource, StaticReadOnly};
use super::stats_collector::StatsCollector;
use crate::clock::{Clock, SystemClock};

/// Statistics, scoring and cleanup over a single store.
pub struct InspectorService {
    collector: StatsCollector,
    scorer: HealthScorer,
    registry: CleanupRegistry,
    gate: ReadOnlyGate,
    authorizer: Arc<dyn Authorizer>,
    observers: Vec<Arc<dyn CleanupObserver>>,
}

impl InspectorService {
    /// Start building a service over `store`.
    pub fn builder(store: Arc<dyn BloatStore>) -> InspectorServiceBuilder {
        InspectorServiceBuilder::new(store)
    }

    /// Collect a fresh snapshot and score it.
    pub async fn get_stats(&self) -> DatabaseStats {
        let mut stats = self.collector.collect().await;
        stats.health_score = self.scorer.score(&stats);
        debug!(health_score = stats.health_score, "database stats collected");
        stats
    }

    /// Penalty terms behind the built-in score of `stats`.
    pub fn penalties(&self, stats: &DatabaseStats) -> PenaltyBreakdown {
        compute_penalties(stats)
    }

    /// Run one cleanup action by name.
    ///
    /// Checks run in order and short-circuit: authorization, the read-only
    /// gate, then whitelist resolution. Observers see every call that
    /// passes the gate.
    pub async fn run_cleanup(&self, action: &str) -> CleanupResult {
        if !self.authorizer.is_authorized() {
            warn!(action, "cleanup rejected: caller not authorized");
            return CleanupResult::unauthorized();
        }

        if self.gate.is_read_only() {
            info!(action, "cleanup rejected: read-only mode");
            return CleanupResult::read_only();
        }

        for observer in &self.observers {
            observer.before_cleanup(action);
        }

        let result = match self.registry.resolve(action) {
            Some(resolved) => {
                let result = self.registry.execute(resolved).await;
                info!(
                    action,
                    resolved = %resolved,
                    success = result.success,
                    deleted = result.deleted,
                    "cleanup finished"
                );
                result
            }
            None => {
                warn!(action, "cleanup rejected: action not whitelisted");
                CleanupResult::invalid_action(action)
            }
        };

        for observer in &self.observers {
            observer.after_cleanup(action, &result);
        }

        result
    }

    /// Current read-only state.
    pub fn is_read_only(&self) -> bool {
        self.gate.is_read_only()
    }

    /// Whitelisted names and the actions they run.
    pub fn whitelist(&self) -> &CleanupWhitelist {
        self.registry.whitelist()
    }

    /// Distinct whitelisted actions.
    pub fn available_actions(&self) -> Vec<CleanupAction> {
        self.registry.whitelist().actions()
    }
}

/// Builder for [`InspectorService`].
///
/// Defaults: system clock, no object cache, single-site, never read-only,
/// built-in score, full whitelist, trusted caller, no observers.
pub struct InspectorServiceBuilder {
    store: Arc<dyn BloatStore>,
    object_cache: Arc<dyn ObjectCache>,
    clock: Arc<dyn Clock>,
    multisite: bool,
    read_only: Arc<dyn ReadOnlySource>,
    score_filter: Arc<dyn HealthScoreFilter>,
    whitelist_filters: Vec<Arc<dyn WhitelistFilter>>,
    authorizer: Arc<dyn Authorizer>,
    observers: Vec<Arc<dyn CleanupObserver>>,
}

impl InspectorServiceBuilder {
    fn new(store: Arc<dyn BloatStore>) -> Self {
        Self {
            store,
            object_cache: Arc::new(DisabledObjectCache),
            clock: Arc::new(SystemClock),
            multisite: false,
            read_only: Arc::new(StaticReadOnly(false)),
            score_filter: Arc::new(IdentityScoreFilter),
            whitelist_filters: Vec::new(),
            authorizer: Arc::new(TrustCaller),
            observers: Vec::new(),
        }
    }

    pub fn with_object_cache(mut self, cache: Arc<dyn ObjectCache>) -> Self {
        self.object_cache = cache;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Treat the store as a multisite network (evaluates site transients).
    pub fn with_multisite(mut self, multisite: bool) -> Self {
        self.multisite = multisite;
        self
    }

    pub fn with_read_only_source(mut self, source: Arc<dyn ReadOnlySource>) -> Self {
        self.read_only = source;
        self
    }

    pub fn with_score_filter(mut self, filter: Arc<dyn HealthScoreFilter>) -> Self {
        self.score_filter = filter;
        self
    }

    /// Add a whitelist filter. Filters run in registration order at build.
    pub fn with_whitelist_filter(mut self, filter: Arc<dyn WhitelistFilter>) -> Self {
        self.whitelist_filters.push(filter);
        self
    }

    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn CleanupObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn build(self) -> InspectorService {
        let mut whitelist = CleanupWhitelist::standard();
        for filter in &self.whitelist_filters {
            filter.filter(&mut whitelist);
        }

        let collector = StatsCollector::new(
            Arc::clone(&self.store),
            Arc::clone(&self.object_cache),
            Arc::clone(&self.clock),
            self.multisite,
        );
        let registry = CleanupRegistry::new(
            self.store,
            self.object_cache,
            self.clock,
            self.multisite,
            whitelist,
        );

        InspectorService {
            collector,
            scorer: HealthScorer::new(self.score_filter),
            registry,
            gate: ReadOnlyGate::new(self.read_only),
            authorizer: self.authorizer,
            observers: self.observers,
        }
    }
}
