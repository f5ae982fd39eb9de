//! Build counters

use serde::{Deserialize, Serialize};

/// Counters collected while one tree is built
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeStats {
    pub scopes: usize,
    pub variables: usize,
    /// Spin placeholders minted by reads through loop conditions
    pub placeholders: usize,
    pub merges: usize,
    pub covers: usize,
    pub spins: usize,
    /// Calls made into `merge_fn` and `spin_fn`
    pub phi_requests: usize,
}

impl ScopeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another tree's counters into this one
    pub fn absorb(&mut self, other: &ScopeStats) {
        self.scopes += other.scopes;
        self.variables += other.variables;
        self.placeholders += other.placeholders;
        self.merges += other.merges;
        self.covers += other.covers;
        self.spins += other.spins;
        self.phi_requests += other.phi_requests;
    }

    pub fn joins(&self) -> usize {
        self.merges + self.covers + self.spins
    }
}
