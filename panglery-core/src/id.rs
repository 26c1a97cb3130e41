//! Cache identities for panglers and aggregates.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_UNIQUE: AtomicU64 = AtomicU64::new(0);

/// Distinguishes panglers (and aggregates) bound to the same instance.
///
/// The binding caches are keyed by `(instance, id)`. Clones and bound copies
/// share the id of the pangler they came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PanglerId {
    /// A process-unique identity, the default for new panglers.
    Unique(u64),
    /// An explicit, caller-chosen identity.
    Named(String),
    /// Disables caching: every cached bind produces a fresh pangler.
    NoCache,
}

impl PanglerId {
    /// Allocate a new process-unique id.
    pub fn unique() -> Self {
        PanglerId::Unique(NEXT_UNIQUE.fetch_add(1, Ordering::Relaxed))
    }

    /// An explicit id.
    pub fn named(name: impl Into<String>) -> Self {
        PanglerId::Named(name.into())
    }

    /// Whether binds under this id are memoized.
    pub fn is_cacheable(&self) -> bool {
        !matches!(self, PanglerId::NoCache)
    }
}

impl Default for PanglerId {
    fn default() -> Self {
        Self::unique()
    }
}

impl From<&str> for PanglerId {
    fn from(name: &str) -> Self {
        PanglerId::named(name)
    }
}

impl From<String> for PanglerId {
    fn from(name: String) -> Self {
        PanglerId::Named(name)
    }
}

impl fmt::Display for PanglerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanglerId::Unique(n) => write!(f, "#{n}"),
            PanglerId::Named(name) => f.write_str(name),
            PanglerId::NoCache => f.write_str("<no cache>"),
        }
    }
}
