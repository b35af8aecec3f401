//! Selection predicates shared by diagnostics and cleanup.
//!
//! Each predicate is a single SQL fragment. Count queries, target selection
//! and bulk deletes all splice the same fragment, so a cleanup removes
//! exactly the rows its diagnostic reported.
//!
//! Name prefixes match with `GLOB`, which is case-sensitive and treats `_`
//! literally. `LIKE` folds ASCII case, so a selection could never agree with
//! the exact-prefix key extraction.

use dbsweep_core::inspector::{CommentStatus, MetaKind, PostKind};

use super::tables::TableNames;

/// Rows of any transient, plain or network-wide, stored in the options table.
pub const TRANSIENT_ROWS: &str =
    "(option_name GLOB '_transient_*' OR option_name GLOB '_site_transient_*')";

/// Transient timeout rows whose deadline (`?1`, UNIX seconds) has passed.
pub const EXPIRED_TRANSIENT_TIMEOUTS: &str =
    "option_name GLOB '_transient_timeout_*' AND CAST(option_value AS INTEGER) < ?1";

/// Network-wide transient timeout rows whose deadline (`?1`) has passed.
pub const EXPIRED_SITE_TRANSIENT_TIMEOUTS: &str =
    "meta_key GLOB '_site_transient_timeout_*' AND CAST(meta_value AS INTEGER) < ?1";

/// Options loaded on every request.
pub const AUTOLOADED: &str = "autoload IN ('yes', 'on', 'auto-on', 'auto')";

/// Payload size of an option in bytes.
pub const OPTION_SIZE: &str = "LENGTH(CAST(option_value AS BLOB))";

/// Comments in the moderation state bound to `?1`.
pub const COMMENT_STATUS: &str = "comment_approved = ?1";

/// Predicate selecting content rows of `kind`.
pub const fn post_predicate(kind: PostKind) -> &'static str {
    match kind {
        PostKind::Revision => "post_type = 'revision'",
        PostKind::AutoDraft => "post_status = 'auto-draft'",
        PostKind::Trashed => "post_status = 'trash'",
    }
}

/// Bind value for [`COMMENT_STATUS`].
pub const fn comment_status(status: CommentStatus) -> &'static str {
    status.as_str()
}

/// `FROM ... WHERE ...` clause selecting orphaned metadata rows as `m`.
pub fn orphaned_meta_source(tables: &TableNames, kind: MetaKind) -> String {
    let (meta, parent, foreign_key, primary_key) = match kind {
        MetaKind::Post => (&tables.postmeta, &tables.posts, "post_id", "ID"),
        MetaKind::Comment => (&tables.commentmeta, &tables.comments, "comment_id", "comment_ID"),
    };
    format!(
        "FROM {meta} m LEFT JOIN {parent} p ON m.{foreign_key} = p.{primary_key} \
         WHERE p.{primary_key} IS NULL"
    )
}

/* -------------------------------------------------------------------------- */
/* Statement builders */
/* -------------------------------------------------------------------------- */

pub fn count_orphaned_meta(tables: &TableNames, kind: MetaKind) -> String {
    format!("SELECT COUNT(*) {}", orphaned_meta_source(tables, kind))
}

pub fn delete_orphaned_meta(tables: &TableNames, kind: MetaKind) -> String {
    let meta = match kind {
        MetaKind::Post => &tables.postmeta,
        MetaKind::Comment => &tables.commentmeta,
    };
    format!(
        "DELETE FROM {meta} WHERE meta_id IN (SELECT m.meta_id {})",
        orphaned_meta_source(tables, kind)
    )
}

pub fn count_posts(tables: &TableNames, kind: PostKind) -> String {
    format!("SELECT COUNT(*) FROM {} WHERE {}", tables.posts, post_predicate(kind))
}

pub fn select_post_ids(tables: &TableNames, kind: PostKind) -> String {
    format!("SELECT ID FROM {} WHERE {} ORDER BY ID", tables.posts, post_predicate(kind))
}

pub fn count_comments(tables: &TableNames) -> String {
    format!("SELECT COUNT(*) FROM {} WHERE {COMMENT_STATUS}", tables.comments)
}

pub fn select_comment_ids(tables: &TableNames) -> String {
    format!("SELECT comment_ID FROM {} WHERE {COMMENT_STATUS} ORDER BY comment_ID", tables.comments)
}
