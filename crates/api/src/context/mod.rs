//! Application context - dependency injection container

use std::sync::Arc;

use dbsweep_core::inspector::{ObjectCache, ReadOnlySource};
use dbsweep_core::InspectorService;
use dbsweep_domain::{Config, Result};
use dbsweep_infra::{
    DbManager, EnvReadOnlySource, MokaObjectCache, SqliteBloatRepository, TableNames,
};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub tables: TableNames,
    /// In-process cache flushed by the `object_cache` action. Embedders fill
    /// it through [`MokaObjectCache::insert`]; the CLI never does.
    pub object_cache: Option<Arc<MokaObjectCache>>,
    pub inspector: Arc<InspectorService>,
}

impl AppContext {
    /// Create the application context from a validated configuration.
    ///
    /// The read-only gate follows `DBSWEEP_READ_ONLY`, re-read on every
    /// cleanup call, and falls back to the configured flag when it is unset.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let tables = TableNames::new(&config.database.table_prefix)?;
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        let store = Arc::new(SqliteBloatRepository::new(Arc::clone(&db), tables.clone()));

        let read_only: Arc<dyn ReadOnlySource> =
            Arc::new(EnvReadOnlySource::new(config.inspector.read_only));

        let mut builder = InspectorService::builder(store)
            .with_multisite(config.inspector.multisite)
            .with_read_only_source(read_only);

        let object_cache = config
            .inspector
            .object_cache
            .then(|| Arc::new(MokaObjectCache::new(config.inspector.object_cache_capacity)));
        if let Some(cache) = &object_cache {
            builder = builder.with_object_cache(Arc::clone(cache) as Arc<dyn ObjectCache>);
        }

        info!(
            db_path = %config.database.path,
            table_prefix = tables.prefix(),
            multisite = config.inspector.multisite,
            object_cache = object_cache.is_some(),
            "application context initialised"
        );

        Ok(Self { config, db, tables, object_cache, inspector: Arc::new(builder.build()) })
    }

    /// Create the inspected tables if they are missing.
    pub fn install_schema(&self) -> Result<()> {
        self.db.install_schema(&self.tables)
    }

    /// Verify the database answers a trivial query.
    pub fn health_check(&self) -> Result<()> {
        self.db.health_check()
    }
}
