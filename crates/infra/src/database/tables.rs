//! Prefixed table names of the inspected schema.
//!
//! SQLite cannot bind identifiers as parameters, so table names are spliced
//! into SQL text. They are only ever built here, from a validated prefix.

use dbsweep_domain::{is_valid_table_prefix, DbSweepError, Result};

/// Fully qualified names of every table the inspector touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    prefix: String,
    pub options: String,
    pub posts: String,
    pub postmeta: String,
    pub comments: String,
    pub commentmeta: String,
    pub sitemeta: String,
}

impl TableNames {
    /// Build names for `prefix`. Rejects anything outside `[A-Za-z0-9_]`.
    pub fn new(prefix: &str) -> Result<Self> {
        if !is_valid_table_prefix(prefix) {
            return Err(DbSweepError::Config(format!("invalid table prefix '{prefix}'")));
        }

        Ok(Self {
            prefix: prefix.to_owned(),
            options: format!("{prefix}options"),
            posts: format!("{prefix}posts"),
            postmeta: format!("{prefix}postmeta"),
            comments: format!("{prefix}comments"),
            commentmeta: format!("{prefix}commentmeta"),
            sitemeta: format!("{prefix}sitemeta"),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
