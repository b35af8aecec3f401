//! Object cache integrations

pub mod object_cache;

pub use object_cache::MokaObjectCache;
