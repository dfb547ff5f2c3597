use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

/// Process-unique identifier of a part, wrapper or data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartId(u64);

impl PartId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic identifier source.
///
/// Cloning shares the underlying counter. The process-wide instance returned
/// by [`IdRegistry::global`] is never reset while the process runs; tests and
/// hosts wanting reproducible ids build their own with [`IdRegistry::new`].
#[derive(Debug, Clone)]
pub struct IdRegistry {
    next: Arc<AtomicU64>,
}

impl Default for IdRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IdRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(first)),
        }
    }

    /// Shared registry used by part constructors that take no registry.
    #[must_use]
    pub fn global() -> Self {
        static GLOBAL: OnceLock<IdRegistry> = OnceLock::new();
        GLOBAL.get_or_init(IdRegistry::new).clone()
    }

    /// Issues the next identifier. Safe to call from any thread.
    pub fn next_id(&self) -> PartId {
        PartId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Identifier the next call to `next_id` would return.
    #[must_use]
    pub fn peek(&self) -> PartId {
        PartId(self.next.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn shares_counter_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.next, &other.next)
    }
}
