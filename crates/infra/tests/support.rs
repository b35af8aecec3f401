#![allow(dead_code)]

use std::sync::Arc;

use dbsweep_infra::database::{DbManager, SqliteBloatRepository, TableNames};
use rusqlite::{params, ToSql};
use tempfile::TempDir;

/// Timestamp the fixtures treat as "now".
pub const NOW: i64 = 1_700_000_000;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    pub tables: TableNames,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new temporary database with the `wp_` schema installed.
    pub fn new() -> Self {
        Self::with_prefix("wp_")
    }

    pub fn with_prefix(prefix: &str) -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("site.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        let tables = TableNames::new(prefix).expect("valid table prefix");
        manager.install_schema(&tables).expect("schema should install");

        Self { manager: Arc::new(manager), tables, _temp_dir: temp_dir }
    }

    /// Repository over this database.
    pub fn repository(&self) -> Arc<SqliteBloatRepository> {
        Arc::new(SqliteBloatRepository::new(Arc::clone(&self.manager), self.tables.clone()))
    }

    /// Execute a single statement with positional parameters.
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> i64 {
        let conn = self.manager.get_connection().expect("connection should be available");
        conn.execute(sql, params).expect("statement should succeed");
        conn.last_insert_rowid()
    }

    /// Run a `SELECT COUNT(*)`-style query.
    pub fn scalar(&self, sql: &str) -> i64 {
        let conn = self.manager.get_connection().expect("connection should be available");
        conn.query_row(sql, params![], |row| row.get(0)).expect("scalar query should succeed")
    }

    /* ---------------------------------------------------------------------- */
    /* Seeding */
    /* ---------------------------------------------------------------------- */

    pub fn option(&self, name: &str, value: &str, autoload: &str) {
        let sql = format!(
            "INSERT INTO {} (option_name, option_value, autoload) VALUES (?1, ?2, ?3)",
            self.tables.options
        );
        self.execute(&sql, &[&name, &value, &autoload]);
    }

    /// Transient value plus its timeout row.
    pub fn transient(&self, key: &str, expires_at: i64) {
        self.option(&format!("_transient_{key}"), "payload", "no");
        self.option(&format!("_transient_timeout_{key}"), &expires_at.to_string(), "no");
    }

    /// Network-wide transient stored in the site metadata table.
    pub fn site_transient(&self, key: &str, expires_at: i64) {
        self.sitemeta(&format!("_site_transient_{key}"), "payload");
        self.sitemeta(&format!("_site_transient_timeout_{key}"), &expires_at.to_string());
    }

    pub fn sitemeta(&self, key: &str, value: &str) {
        let sql = format!(
            "INSERT INTO {} (site_id, meta_key, meta_value) VALUES (1, ?1, ?2)",
            self.tables.sitemeta
        );
        self.execute(&sql, &[&key, &value]);
    }

    pub fn post(&self, post_type: &str, status: &str, parent: i64) -> i64 {
        let sql = format!(
            "INSERT INTO {} (post_type, post_status, post_parent, post_title) \
             VALUES (?1, ?2, ?3, 'fixture')",
            self.tables.posts
        );
        self.execute(&sql, &[&post_type, &status, &parent])
    }

    pub fn postmeta(&self, post_id: i64) -> i64 {
        let sql = format!(
            "INSERT INTO {} (post_id, meta_key, meta_value) VALUES (?1, '_edit_lock', '1')",
            self.tables.postmeta
        );
        self.execute(&sql, &[&post_id])
    }

    pub fn comment(&self, post_id: i64, approved: &str, parent: i64) -> i64 {
        let sql = format!(
            "INSERT INTO {} (comment_post_ID, comment_approved, comment_parent, comment_content) \
             VALUES (?1, ?2, ?3, 'hello')",
            self.tables.comments
        );
        self.execute(&sql, &[&post_id, &approved, &parent])
    }

    pub fn commentmeta(&self, comment_id: i64) -> i64 {
        let sql = format!(
            "INSERT INTO {} (comment_id, meta_key, meta_value) VALUES (?1, 'akismet', '1')",
            self.tables.commentmeta
        );
        self.execute(&sql, &[&comment_id])
    }

    /* ---------------------------------------------------------------------- */
    /* Inspection */
    /* ---------------------------------------------------------------------- */

    pub fn has_option(&self, name: &str) -> bool {
        let conn = self.manager.get_connection().expect("connection should be available");
        let sql = format!("SELECT COUNT(*) FROM {} WHERE option_name = ?1", self.tables.options);
        let found: i64 =
            conn.query_row(&sql, params![name], |row| row.get(0)).expect("lookup should succeed");
        found > 0
    }

    pub fn count_rows(&self, table: &str) -> i64 {
        self.scalar(&format!("SELECT COUNT(*) FROM {table}"))
    }

    pub fn post_parent(&self, id: i64) -> Option<i64> {
        let conn = self.manager.get_connection().expect("connection should be available");
        let sql = format!("SELECT post_parent FROM {} WHERE ID = ?1", self.tables.posts);
        conn.query_row(&sql, params![id], |row| row.get(0)).ok()
    }

    pub fn comment_parent(&self, id: i64) -> Option<i64> {
        let conn = self.manager.get_connection().expect("connection should be available");
        let sql =
            format!("SELECT comment_parent FROM {} WHERE comment_ID = ?1", self.tables.comments);
        conn.query_row(&sql, params![id], |row| row.get(0)).ok()
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}
