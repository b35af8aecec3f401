//! Environment-driven read-only source.

use dbsweep_core::inspector::ReadOnlySource;

use super::loader::{env_bool, ENV_READ_ONLY};

/// Reads `DBSWEEP_READ_ONLY` on every call, falling back to the configured
/// value when the variable is unset.
#[derive(Debug, Clone)]
pub struct EnvReadOnlySource {
    key: String,
    fallback: bool,
}

impl EnvReadOnlySource {
    pub fn new(fallback: bool) -> Self {
        Self::with_key(ENV_READ_ONLY, fallback)
    }

    /// Read a different variable.
    pub fn with_key(key: impl Into<String>, fallback: bool) -> Self {
        Self { key: key.into(), fallback }
    }
}

impl ReadOnlySource for EnvReadOnlySource {
    fn is_read_only(&self) -> bool {
        env_bool(&self.key, self.fallback)
    }
}
