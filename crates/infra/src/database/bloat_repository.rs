//! SQLite-backed bloat repository.
//!
//! Implements `BloatStore` over the prefixed schema. Every call runs on
//! `spawn_blocking` with a pooled connection; multi-statement deletions of a
//! single row run inside one transaction.

use std::sync::Arc;

use async_trait::async_trait;
use dbsweep_core::inspector::{BloatStore, CommentStatus, MetaKind, PostKind};
use dbsweep_domain::constants::{
    SITE_TRANSIENT_PREFIX, SITE_TRANSIENT_TIMEOUT_PREFIX, TRANSIENT_PREFIX,
    TRANSIENT_TIMEOUT_PREFIX,
};
use dbsweep_domain::{AutoloadEntry, AutoloadSummary, DbSweepError, Result as DomainResult};
use rusqlite::{params, Connection, OptionalExtension, Params};
use tokio::task;
use tracing::debug;

use super::manager::DbManager;
use super::queries::{
    self, AUTOLOADED, EXPIRED_SITE_TRANSIENT_TIMEOUTS, EXPIRED_TRANSIENT_TIMEOUTS, OPTION_SIZE,
    TRANSIENT_ROWS,
};
use super::tables::TableNames;
use crate::errors::InfraError;

/// Bloat repository backed by a pooled SQLite database.
pub struct SqliteBloatRepository {
    db: Arc<DbManager>,
    tables: Arc<TableNames>,
}

impl SqliteBloatRepository {
    /// Construct a repository over the tables named by `tables`.
    pub fn new(db: Arc<DbManager>, tables: TableNames) -> Self {
        Self { db, tables: Arc::new(tables) }
    }

    pub fn tables(&self) -> &TableNames {
        &self.tables
    }

    /// Run `op` on a blocking thread with a pooled connection.
    async fn with_connection<T, F>(&self, op: F) -> DomainResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection, &TableNames) -> DomainResult<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let tables = Arc::clone(&self.tables);

        task::spawn_blocking(move || -> DomainResult<T> {
            let mut conn = db.get_connection()?;
            op(&mut *conn, &*tables)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl BloatStore for SqliteBloatRepository {
    /* ---------------------------------------------------------------------- */
    /* Size introspection */
    /* ---------------------------------------------------------------------- */

    async fn total_size(&self) -> DomainResult<Option<u64>> {
        self.with_connection(|conn, _| {
            let total: Option<i64> = conn
                .query_row("SELECT SUM(pgsize) FROM dbstat", params![], |row| row.get(0))
                .map_err(map_sql_error)?;
            Ok(total.map(clamp_u64))
        })
        .await
    }

    async fn options_table_size(&self) -> DomainResult<u64> {
        self.with_connection(|conn, tables| {
            let size: Option<i64> = conn
                .query_row(
                    "SELECT SUM(pgsize) FROM dbstat WHERE name = ?1 OR name IN \
                     (SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = ?1)",
                    params![tables.options],
                    |row| row.get(0),
                )
                .map_err(map_sql_error)?;
            Ok(size.map_or(0, clamp_u64))
        })
        .await
    }

    /* ---------------------------------------------------------------------- */
    /* Diagnostics */
    /* ---------------------------------------------------------------------- */

    async fn autoload_summary(&self) -> DomainResult<AutoloadSummary> {
        self.with_connection(|conn, tables| {
            let sql = format!(
                "SELECT COUNT(*), COALESCE(SUM({OPTION_SIZE}), 0) FROM {} WHERE {AUTOLOADED}",
                tables.options
            );
            let (count, size): (i64, i64) = conn
                .query_row(&sql, params![], |row| Ok((row.get(0)?, row.get(1)?)))
                .map_err(map_sql_error)?;
            Ok(AutoloadSummary { count: clamp_u64(count), size: clamp_u64(size) })
        })
        .await
    }

    async fn top_autoload(&self, limit: usize) -> DomainResult<Vec<AutoloadEntry>> {
        self.with_connection(move |conn, tables| {
            let sql = format!(
                "SELECT option_name, {OPTION_SIZE} AS size FROM {} WHERE {AUTOLOADED} \
                 ORDER BY size DESC, option_name ASC LIMIT ?1",
                tables.options
            );
            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let rows = stmt
                .query_map(params![limit as i64], |row| {
                    Ok(AutoloadEntry::new(row.get::<_, String>(0)?, clamp_u64(row.get(1)?)))
                })
                .map_err(map_sql_error)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(map_sql_error)
        })
        .await
    }

    async fn count_transients(&self) -> DomainResult<u64> {
        self.with_connection(|conn, tables| {
            let sql = format!("SELECT COUNT(*) FROM {} WHERE {TRANSIENT_ROWS}", tables.options);
            count(conn, &sql, params![])
        })
        .await
    }

    async fn count_expired_transients(&self, now: i64) -> DomainResult<u64> {
        self.with_connection(move |conn, tables| {
            let sql = format!(
                "SELECT COUNT(*) FROM {} WHERE {EXPIRED_TRANSIENT_TIMEOUTS}",
                tables.options
            );
            count(conn, &sql, params![now])
        })
        .await
    }

    async fn count_expired_site_transients(&self, now: i64) -> DomainResult<u64> {
        self.with_connection(move |conn, tables| {
            let sql = format!(
                "SELECT COUNT(*) FROM {} WHERE {EXPIRED_SITE_TRANSIENT_TIMEOUTS}",
                tables.sitemeta
            );
            count(conn, &sql, params![now])
        })
        .await
    }

    async fn count_posts(&self, kind: PostKind) -> DomainResult<u64> {
        self.with_connection(move |conn, tables| {
            count(conn, &queries::count_posts(tables, kind), params![])
        })
        .await
    }

    async fn count_orphaned_meta(&self, kind: MetaKind) -> DomainResult<u64> {
        self.with_connection(move |conn, tables| {
            count(conn, &queries::count_orphaned_meta(tables, kind), params![])
        })
        .await
    }

    async fn count_comments(&self, status: CommentStatus) -> DomainResult<u64> {
        self.with_connection(move |conn, tables| {
            count(conn, &queries::count_comments(tables), params![queries::comment_status(status)])
        })
        .await
    }

    /* ---------------------------------------------------------------------- */
    /* Target selection */
    /* ---------------------------------------------------------------------- */

    async fn expired_transient_keys(&self, now: i64) -> DomainResult<Vec<String>> {
        self.with_connection(move |conn, tables| {
            let sql = format!(
                "SELECT option_name FROM {} WHERE {EXPIRED_TRANSIENT_TIMEOUTS} ORDER BY option_name",
                tables.options
            );
            let names = strings(conn, &sql, params![now])?;
            Ok(strip_prefixes(names, TRANSIENT_TIMEOUT_PREFIX))
        })
        .await
    }

    async fn expired_site_transient_keys(&self, now: i64) -> DomainResult<Vec<String>> {
        self.with_connection(move |conn, tables| {
            let sql = format!(
                "SELECT meta_key FROM {} WHERE {EXPIRED_SITE_TRANSIENT_TIMEOUTS} ORDER BY meta_key",
                tables.sitemeta
            );
            let names = strings(conn, &sql, params![now])?;
            Ok(strip_prefixes(names, SITE_TRANSIENT_TIMEOUT_PREFIX))
        })
        .await
    }

    async fn post_ids(&self, kind: PostKind) -> DomainResult<Vec<i64>> {
        self.with_connection(move |conn, tables| {
            ids(conn, &queries::select_post_ids(tables, kind), params![])
        })
        .await
    }

    async fn comment_ids(&self, status: CommentStatus) -> DomainResult<Vec<i64>> {
        self.with_connection(move |conn, tables| {
            ids(
                conn,
                &queries::select_comment_ids(tables),
                params![queries::comment_status(status)],
            )
        })
        .await
    }

    /* ---------------------------------------------------------------------- */
    /* Deletion */
    /* ---------------------------------------------------------------------- */

    async fn delete_transient(&self, key: &str) -> DomainResult<bool> {
        let value = format!("{TRANSIENT_PREFIX}{key}");
        let timeout = format!("{TRANSIENT_TIMEOUT_PREFIX}{key}");
        self.with_connection(move |conn, tables| {
            let sql = format!("DELETE FROM {} WHERE option_name IN (?1, ?2)", tables.options);
            let removed = conn.execute(&sql, params![value, timeout]).map_err(map_sql_error)?;
            Ok(removed > 0)
        })
        .await
    }

    async fn delete_site_transient(&self, key: &str) -> DomainResult<bool> {
        let value = format!("{SITE_TRANSIENT_PREFIX}{key}");
        let timeout = format!("{SITE_TRANSIENT_TIMEOUT_PREFIX}{key}");
        self.with_connection(move |conn, tables| {
            let sql = format!("DELETE FROM {} WHERE meta_key IN (?1, ?2)", tables.sitemeta);
            let removed = conn.execute(&sql, params![value, timeout]).map_err(map_sql_error)?;
            Ok(removed > 0)
        })
        .await
    }

    async fn delete_all_transients(&self) -> DomainResult<u64> {
        self.with_connection(|conn, tables| {
            let sql = format!("DELETE FROM {} WHERE {TRANSIENT_ROWS}", tables.options);
            let removed = conn.execute(&sql, params![]).map_err(map_sql_error)?;
            Ok(removed as u64)
        })
        .await
    }

    async fn delete_revision(&self, id: i64) -> DomainResult<bool> {
        self.with_connection(move |conn, tables| {
            let tx = conn.transaction().map_err(map_sql_error)?;

            let post_type: Option<String> = tx
                .query_row(
                    &format!("SELECT post_type FROM {} WHERE ID = ?1", tables.posts),
                    params![id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(map_sql_error)?;
            if post_type.as_deref() != Some("revision") {
                debug!(post_id = id, "skipping row that is no longer a revision");
                return Ok(false);
            }

            tx.execute(&format!("DELETE FROM {} WHERE post_id = ?1", tables.postmeta), params![id])
                .map_err(map_sql_error)?;
            let removed = tx
                .execute(&format!("DELETE FROM {} WHERE ID = ?1", tables.posts), params![id])
                .map_err(map_sql_error)?;

            tx.commit().map_err(map_sql_error)?;
            Ok(removed > 0)
        })
        .await
    }

    async fn delete_post(&self, id: i64) -> DomainResult<bool> {
        self.with_connection(move |conn, tables| {
            let tx = conn.transaction().map_err(map_sql_error)?;

            let parent: Option<i64> = tx
                .query_row(
                    &format!("SELECT post_parent FROM {} WHERE ID = ?1", tables.posts),
                    params![id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(map_sql_error)?;
            let Some(parent) = parent else {
                return Ok(false);
            };

            let statements = [
                // Child revisions and their metadata
                format!(
                    "DELETE FROM {meta} WHERE post_id IN \
                     (SELECT ID FROM {posts} WHERE post_parent = ?1 AND post_type = 'revision')",
                    meta = tables.postmeta,
                    posts = tables.posts
                ),
                format!(
                    "DELETE FROM {} WHERE post_parent = ?1 AND post_type = 'revision'",
                    tables.posts
                ),
                // Comments on the post and their metadata
                format!(
                    "DELETE FROM {meta} WHERE comment_id IN \
                     (SELECT comment_ID FROM {comments} WHERE comment_post_ID = ?1)",
                    meta = tables.commentmeta,
                    comments = tables.comments
                ),
                format!("DELETE FROM {} WHERE comment_post_ID = ?1", tables.comments),
                format!("DELETE FROM {} WHERE post_id = ?1", tables.postmeta),
            ];
            for sql in &statements {
                tx.execute(sql, params![id]).map_err(map_sql_error)?;
            }

            // Remaining children move up to the deleted post's parent
            tx.execute(
                &format!("UPDATE {} SET post_parent = ?2 WHERE post_parent = ?1", tables.posts),
                params![id, parent],
            )
            .map_err(map_sql_error)?;

            let removed = tx
                .execute(&format!("DELETE FROM {} WHERE ID = ?1", tables.posts), params![id])
                .map_err(map_sql_error)?;

            tx.commit().map_err(map_sql_error)?;
            Ok(removed > 0)
        })
        .await
    }

    async fn delete_comment(&self, id: i64) -> DomainResult<bool> {
        self.with_connection(move |conn, tables| {
            let tx = conn.transaction().map_err(map_sql_error)?;

            let parent: Option<i64> = tx
                .query_row(
                    &format!("SELECT comment_parent FROM {} WHERE comment_ID = ?1", tables.comments),
                    params![id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(map_sql_error)?;
            let Some(parent) = parent else {
                return Ok(false);
            };

            tx.execute(
                &format!(
                    "UPDATE {} SET comment_parent = ?2 WHERE comment_parent = ?1",
                    tables.comments
                ),
                params![id, parent],
            )
            .map_err(map_sql_error)?;
            tx.execute(
                &format!("DELETE FROM {} WHERE comment_id = ?1", tables.commentmeta),
                params![id],
            )
            .map_err(map_sql_error)?;
            let removed = tx
                .execute(
                    &format!("DELETE FROM {} WHERE comment_ID = ?1", tables.comments),
                    params![id],
                )
                .map_err(map_sql_error)?;

            tx.commit().map_err(map_sql_error)?;
            Ok(removed > 0)
        })
        .await
    }

    async fn delete_orphaned_meta(&self, kind: MetaKind) -> DomainResult<u64> {
        self.with_connection(move |conn, tables| {
            let removed = conn
                .execute(&queries::delete_orphaned_meta(tables, kind), params![])
                .map_err(map_sql_error)?;
            Ok(removed as u64)
        })
        .await
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn count<P: Params>(conn: &Connection, sql: &str, params: P) -> DomainResult<u64> {
    let value: i64 = conn.query_row(sql, params, |row| row.get(0)).map_err(map_sql_error)?;
    Ok(clamp_u64(value))
}

fn strings<P: Params>(conn: &Connection, sql: &str, params: P) -> DomainResult<Vec<String>> {
    let mut stmt = conn.prepare(sql).map_err(map_sql_error)?;
    let rows = stmt.query_map(params, |row| row.get::<_, String>(0)).map_err(map_sql_error)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(map_sql_error)
}

fn ids<P: Params>(conn: &Connection, sql: &str, params: P) -> DomainResult<Vec<i64>> {
    let mut stmt = conn.prepare(sql).map_err(map_sql_error)?;
    let rows = stmt.query_map(params, |row| row.get::<_, i64>(0)).map_err(map_sql_error)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(map_sql_error)
}

/// Strips the timeout prefix off selected names. Names without the exact
/// prefix are dropped rather than deleted under a guessed key.
fn strip_prefixes(names: Vec<String>, prefix: &str) -> Vec<String> {
    names.into_iter().filter_map(|name| name.strip_prefix(prefix).map(str::to_owned)).collect()
}

fn clamp_u64(value: i64) -> u64 {
    value.max(0) as u64
}

// ============================================================================
// Error Mapping
// ============================================================================

fn map_sql_error(err: rusqlite::Error) -> DbSweepError {
    DbSweepError::from(InfraError::from(err))
}

/// Map `JoinError` to `DbSweepError` for async task failures.
fn map_join_error(err: task::JoinError) -> DbSweepError {
    if err.is_cancelled() {
        DbSweepError::Internal("blocking bloat query task cancelled".into())
    } else {
        DbSweepError::Internal(format!("blocking bloat query task failed: {err}"))
    }
}
