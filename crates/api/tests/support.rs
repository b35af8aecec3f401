#![allow(dead_code)]

use dbsweep_domain::Config;
use dbsweep_lib::context::AppContext;
use rusqlite::ToSql;
use tempfile::TempDir;

/// Application context over a throwaway database with the schema installed.
pub struct TestApp {
    pub ctx: AppContext,
    /// Keep temporary directory alive for the lifetime of the context.
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a context after letting `adjust` tweak the default config.
    pub fn with_config(adjust: impl FnOnce(&mut Config)) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temporary database directory");
        let mut config =
            Config::for_path(temp_dir.path().join("site.db").to_string_lossy().into_owned());
        adjust(&mut config);

        let ctx = AppContext::new(config).expect("failed to initialise application context");
        dbsweep_lib::init_schema(&ctx).expect("failed to install schema");

        Self { ctx, _temp_dir: temp_dir }
    }

    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) {
        let conn = self.ctx.db.get_connection().expect("connection should be available");
        conn.execute(sql, params).expect("statement should succeed");
    }

    pub fn post(&self, post_type: &str, status: &str) {
        let sql = format!(
            "INSERT INTO {} (post_type, post_status) VALUES (?1, ?2)",
            self.ctx.tables.posts
        );
        self.execute(&sql, &[&post_type, &status]);
    }

    pub fn option(&self, name: &str, value: &str) {
        let sql = format!(
            "INSERT INTO {} (option_name, option_value, autoload) VALUES (?1, ?2, 'yes')",
            self.ctx.tables.options
        );
        self.execute(&sql, &[&name, &value]);
    }
}
