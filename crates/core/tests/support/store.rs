//! In-memory `BloatStore` mirroring the SQL adapter's predicates.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use dbsweep_core::inspector::{BloatStore, CommentStatus, MetaKind, PostKind};
use dbsweep_domain::constants::{
    AUTOLOAD_VALUES, SITE_TRANSIENT_PREFIX, SITE_TRANSIENT_TIMEOUT_PREFIX, TRANSIENT_PREFIX,
    TRANSIENT_TIMEOUT_PREFIX,
};
use dbsweep_domain::{AutoloadEntry, AutoloadSummary, DbSweepError, Result};

#[derive(Debug, Clone)]
pub struct Post {
    pub post_type: String,
    pub post_status: String,
    pub post_parent: i64,
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub post_id: i64,
    pub approved: String,
    pub parent: i64,
}

#[derive(Default)]
struct State {
    options: BTreeMap<String, (String, String)>,
    sitemeta: BTreeMap<String, String>,
    posts: BTreeMap<i64, Post>,
    postmeta: Vec<(i64, i64)>,
    comments: BTreeMap<i64, Comment>,
    commentmeta: Vec<(i64, i64)>,
    next_meta_id: i64,
    total_size: Option<u64>,
    options_size: u64,
    failing: HashSet<&'static str>,
    calls: Vec<&'static str>,
    mutations: usize,
    deletes_before_failure: Option<usize>,
}

/// Store backed by plain collections.
///
/// Every method records its name so tests can assert which queries ran.
#[derive(Default)]
pub struct MemoryBloatStore {
    state: Mutex<State>,
}

impl MemoryBloatStore {
    pub fn new() -> Self {
        let store = Self::default();
        store.state.lock().unwrap().next_meta_id = 1;
        store
    }

    /* ---------------------------------------------------------------------- */
    /* Seeding */
    /* ---------------------------------------------------------------------- */

    pub fn with_sizes(self, total: Option<u64>, options: u64) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.total_size = total;
            state.options_size = options;
        }
        self
    }

    pub fn option(self, name: &str, value: &str, autoload: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .options
            .insert(name.to_owned(), (value.to_owned(), autoload.to_owned()));
        self
    }

    /// Transient value plus timeout row.
    pub fn transient(self, key: &str, expires_at: i64) -> Self {
        self.option(&format!("{TRANSIENT_PREFIX}{key}"), "cached", "no").option(
            &format!("{TRANSIENT_TIMEOUT_PREFIX}{key}"),
            &expires_at.to_string(),
            "no",
        )
    }

    pub fn site_transient(self, key: &str, expires_at: i64) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.sitemeta.insert(format!("{SITE_TRANSIENT_PREFIX}{key}"), "cached".into());
            state
                .sitemeta
                .insert(format!("{SITE_TRANSIENT_TIMEOUT_PREFIX}{key}"), expires_at.to_string());
        }
        self
    }

    pub fn post(self, id: i64, post_type: &str, post_status: &str, post_parent: i64) -> Self {
        self.state.lock().unwrap().posts.insert(id, Post {
            post_type: post_type.into(),
            post_status: post_status.into(),
            post_parent,
        });
        self
    }

    pub fn postmeta(self, post_id: i64) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let meta_id = state.next_meta_id;
            state.next_meta_id += 1;
            state.postmeta.push((meta_id, post_id));
        }
        self
    }

    pub fn comment(self, id: i64, post_id: i64, approved: &str, parent: i64) -> Self {
        self.state
            .lock()
            .unwrap()
            .comments
            .insert(id, Comment { post_id, approved: approved.into(), parent });
        self
    }

    pub fn commentmeta(self, comment_id: i64) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let meta_id = state.next_meta_id;
            state.next_meta_id += 1;
            state.commentmeta.push((meta_id, comment_id));
        }
        self
    }

    /// Make the named method fail with a database error.
    pub fn failing(self, method: &'static str) -> Self {
        self.state.lock().unwrap().failing.insert(method);
        self
    }

    /// Allow `n` successful per-row deletions, then fail.
    pub fn fail_after_deletes(self, n: usize) -> Self {
        self.state.lock().unwrap().deletes_before_failure = Some(n);
        self
    }

    /* ---------------------------------------------------------------------- */
    /* Inspection */
    /* ---------------------------------------------------------------------- */

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutations(&self) -> usize {
        self.state.lock().unwrap().mutations
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.state.lock().unwrap().options.contains_key(name)
    }

    pub fn post_snapshot(&self, id: i64) -> Option<Post> {
        self.state.lock().unwrap().posts.get(&id).cloned()
    }

    pub fn comment_snapshot(&self, id: i64) -> Option<Comment> {
        self.state.lock().unwrap().comments.get(&id).cloned()
    }

    pub fn postmeta_count(&self) -> usize {
        self.state.lock().unwrap().postmeta.len()
    }

    pub fn commentmeta_count(&self) -> usize {
        self.state.lock().unwrap().commentmeta.len()
    }

    fn enter(&self, method: &'static str) -> Result<std::sync::MutexGuard<'_, State>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(method);
        if state.failing.contains(method) {
            return Err(DbSweepError::Database(format!("{method} failed")));
        }
        Ok(state)
    }
}

impl State {
    fn matches_post(post: &Post, kind: PostKind) -> bool {
        match kind {
            PostKind::Revision => post.post_type == "revision",
            PostKind::AutoDraft => post.post_status == "auto-draft",
            PostKind::Trashed => post.post_status == "trash",
        }
    }

    fn is_transient(name: &str) -> bool {
        name.starts_with(TRANSIENT_PREFIX) || name.starts_with(SITE_TRANSIENT_PREFIX)
    }

    fn expired_keys(map: &BTreeMap<String, String>, prefix: &str, now: i64) -> Vec<String> {
        map.iter()
            .filter_map(|(name, value)| {
                let key = name.strip_prefix(prefix)?;
                (value.parse::<i64>().unwrap_or(0) < now).then(|| key.to_owned())
            })
            .collect()
    }

    fn option_values(&self) -> BTreeMap<String, String> {
        self.options.iter().map(|(name, (value, _))| (name.clone(), value.clone())).collect()
    }

    fn orphaned(&self, kind: MetaKind) -> Vec<i64> {
        match kind {
            MetaKind::Post => self
                .postmeta
                .iter()
                .filter(|(_, post_id)| !self.posts.contains_key(post_id))
                .map(|(meta_id, _)| *meta_id)
                .collect(),
            MetaKind::Comment => self
                .commentmeta
                .iter()
                .filter(|(_, comment_id)| !self.comments.contains_key(comment_id))
                .map(|(meta_id, _)| *meta_id)
                .collect(),
        }
    }

    fn begin_delete(&mut self) -> Result<()> {
        if let Some(remaining) = self.deletes_before_failure.as_mut() {
            if *remaining == 0 {
                return Err(DbSweepError::Database("database is locked".into()));
            }
            *remaining -= 1;
        }
        self.mutations += 1;
        Ok(())
    }

    fn remove_comment(&mut self, id: i64) -> bool {
        let Some(comment) = self.comments.remove(&id) else {
            return false;
        };
        for reply in self.comments.values_mut() {
            if reply.parent == id {
                reply.parent = comment.parent;
            }
        }
        self.commentmeta.retain(|(_, comment_id)| *comment_id != id);
        true
    }

    fn remove_post(&mut self, id: i64) -> bool {
        if !self.posts.contains_key(&id) {
            return false;
        }
        let revisions: Vec<i64> = self
            .posts
            .iter()
            .filter(|(_, post)| post.post_parent == id && post.post_type == "revision")
            .map(|(child, _)| *child)
            .collect();
        for revision in revisions {
            self.posts.remove(&revision);
            self.postmeta.retain(|(_, post_id)| *post_id != revision);
        }
        let comments: Vec<i64> = self
            .comments
            .iter()
            .filter(|(_, comment)| comment.post_id == id)
            .map(|(comment_id, _)| *comment_id)
            .collect();
        for comment in comments {
            self.remove_comment(comment);
        }
        self.postmeta.retain(|(_, post_id)| *post_id != id);
        self.posts.remove(&id);
        true
    }
}

#[async_trait]
impl BloatStore for MemoryBloatStore {
    async fn total_size(&self) -> Result<Option<u64>> {
        Ok(self.enter("total_size")?.total_size)
    }

    async fn options_table_size(&self) -> Result<u64> {
        Ok(self.enter("options_table_size")?.options_size)
    }

    async fn autoload_summary(&self) -> Result<AutoloadSummary> {
        let state = self.enter("autoload_summary")?;
        let rows = state.options.values().filter(|(_, autoload)| AUTOLOAD_VALUES.contains(&autoload.as_str()));
        let mut summary = AutoloadSummary::default();
        for (value, _) in rows {
            summary.count += 1;
            summary.size += value.len() as u64;
        }
        Ok(summary)
    }

    async fn top_autoload(&self, limit: usize) -> Result<Vec<AutoloadEntry>> {
        let state = self.enter("top_autoload")?;
        let mut entries: Vec<AutoloadEntry> = state
            .options
            .iter()
            .filter(|(_, (_, autoload))| AUTOLOAD_VALUES.contains(&autoload.as_str()))
            .map(|(name, (value, _))| AutoloadEntry::new(name.clone(), value.len() as u64))
            .collect();
        entries.sort_by(|a, b| b.size.cmp(&a.size));
        entries.truncate(limit);
        Ok(entries)
    }

    async fn count_transients(&self) -> Result<u64> {
        let state = self.enter("count_transients")?;
        Ok(state.options.keys().filter(|name| State::is_transient(name)).count() as u64)
    }

    async fn count_expired_transients(&self, now: i64) -> Result<u64> {
        let state = self.enter("count_expired_transients")?;
        Ok(State::expired_keys(&state.option_values(), TRANSIENT_TIMEOUT_PREFIX, now).len() as u64)
    }

    async fn count_expired_site_transients(&self, now: i64) -> Result<u64> {
        let state = self.enter("count_expired_site_transients")?;
        Ok(State::expired_keys(&state.sitemeta, SITE_TRANSIENT_TIMEOUT_PREFIX, now).len() as u64)
    }

    async fn count_posts(&self, kind: PostKind) -> Result<u64> {
        let state = self.enter("count_posts")?;
        Ok(state.posts.values().filter(|post| State::matches_post(post, kind)).count() as u64)
    }

    async fn count_orphaned_meta(&self, kind: MetaKind) -> Result<u64> {
        let state = self.enter("count_orphaned_meta")?;
        Ok(state.orphaned(kind).len() as u64)
    }

    async fn count_comments(&self, status: CommentStatus) -> Result<u64> {
        let state = self.enter("count_comments")?;
        Ok(state.comments.values().filter(|c| c.approved == status.as_str()).count() as u64)
    }

    async fn expired_transient_keys(&self, now: i64) -> Result<Vec<String>> {
        let state = self.enter("expired_transient_keys")?;
        Ok(State::expired_keys(&state.option_values(), TRANSIENT_TIMEOUT_PREFIX, now))
    }

    async fn expired_site_transient_keys(&self, now: i64) -> Result<Vec<String>> {
        let state = self.enter("expired_site_transient_keys")?;
        Ok(State::expired_keys(&state.sitemeta, SITE_TRANSIENT_TIMEOUT_PREFIX, now))
    }

    async fn post_ids(&self, kind: PostKind) -> Result<Vec<i64>> {
        let state = self.enter("post_ids")?;
        Ok(state
            .posts
            .iter()
            .filter(|(_, post)| State::matches_post(post, kind))
            .map(|(id, _)| *id)
            .collect())
    }

    async fn comment_ids(&self, status: CommentStatus) -> Result<Vec<i64>> {
        let state = self.enter("comment_ids")?;
        Ok(state
            .comments
            .iter()
            .filter(|(_, comment)| comment.approved == status.as_str())
            .map(|(id, _)| *id)
            .collect())
    }

    async fn delete_transient(&self, key: &str) -> Result<bool> {
        let mut state = self.enter("delete_transient")?;
        state.begin_delete()?;
        let value = state.options.remove(&format!("{TRANSIENT_PREFIX}{key}")).is_some();
        let timeout = state.options.remove(&format!("{TRANSIENT_TIMEOUT_PREFIX}{key}")).is_some();
        Ok(value || timeout)
    }

    async fn delete_site_transient(&self, key: &str) -> Result<bool> {
        let mut state = self.enter("delete_site_transient")?;
        state.begin_delete()?;
        let value = state.sitemeta.remove(&format!("{SITE_TRANSIENT_PREFIX}{key}")).is_some();
        let timeout =
            state.sitemeta.remove(&format!("{SITE_TRANSIENT_TIMEOUT_PREFIX}{key}")).is_some();
        Ok(value || timeout)
    }

    async fn delete_all_transients(&self) -> Result<u64> {
        let mut state = self.enter("delete_all_transients")?;
        state.mutations += 1;
        let before = state.options.len();
        state.options.retain(|name, _| !State::is_transient(name));
        Ok((before - state.options.len()) as u64)
    }

    async fn delete_revision(&self, id: i64) -> Result<bool> {
        let mut state = self.enter("delete_revision")?;
        state.begin_delete()?;
        let is_revision = state.posts.get(&id).is_some_and(|post| post.post_type == "revision");
        if !is_revision {
            return Ok(false);
        }
        state.posts.remove(&id);
        state.postmeta.retain(|(_, post_id)| *post_id != id);
        Ok(true)
    }

    async fn delete_post(&self, id: i64) -> Result<bool> {
        let mut state = self.enter("delete_post")?;
        state.begin_delete()?;
        Ok(state.remove_post(id))
    }

    async fn delete_comment(&self, id: i64) -> Result<bool> {
        let mut state = self.enter("delete_comment")?;
        state.begin_delete()?;
        Ok(state.remove_comment(id))
    }

    async fn delete_orphaned_meta(&self, kind: MetaKind) -> Result<u64> {
        let mut state = self.enter("delete_orphaned_meta")?;
        state.mutations += 1;
        let orphaned = state.orphaned(kind);
        match kind {
            MetaKind::Post => state.postmeta.retain(|(meta_id, _)| !orphaned.contains(meta_id)),
            MetaKind::Comment => {
                state.commentmeta.retain(|(meta_id, _)| !orphaned.contains(meta_id))
            }
        }
        Ok(orphaned.len() as u64)
    }
}
