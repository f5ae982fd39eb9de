//! Global index allocation
//!
//! Every Variable Identity is stamped with a monotonic index at creation.
//! The counter is injected into each `ScopeTree` instead of living in a
//! process-wide static, so independent builds decide for themselves whether
//! they share it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of global indices for new Variable Identities
pub trait IndexAllocator: Send {
    /// Return the next unused index
    fn next_index(&mut self) -> u64;
}

/// Counter owned by a single build
#[derive(Debug, Clone, Default)]
pub struct LocalIndexAllocator {
    next: u64,
}

impl LocalIndexAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting at `first`
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl IndexAllocator for LocalIndexAllocator {
    fn next_index(&mut self) -> u64 {
        let index = self.next;
        self.next += 1;
        index
    }
}

/// Counter shared by builds running on different threads
///
/// Clones share one atomic counter, so indices never collide across the
/// trees that hold a clone.
#[derive(Debug, Clone, Default)]
pub struct SharedIndexAllocator {
    next: Arc<AtomicU64>,
}

impl SharedIndexAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indices handed out so far
    pub fn allocated(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl IndexAllocator for SharedIndexAllocator {
    fn next_index(&mut self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl<F> IndexAllocator for F
where
    F: FnMut() -> u64 + Send,
{
    fn next_index(&mut self) -> u64 {
        self()
    }
}
