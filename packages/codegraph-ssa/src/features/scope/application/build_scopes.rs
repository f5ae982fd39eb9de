use crate::config::ScopePolicy;
use crate::errors::Result;
use crate::features::scope::infrastructure::{ScopeStats, ScopeTree};
use crate::features::scope::ports::{SharedIndexAllocator, UnitBuilder};
use crate::shared::constants::parallel::PARALLEL_THRESHOLD;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

/// Output of one unit together with its tree's counters
#[derive(Debug, Clone)]
pub struct UnitResult<O> {
    pub output: O,
    pub stats: ScopeStats,
}

/// Builds many independent units, one scope tree each
///
/// All trees draw global indices from one shared counter, so identities
/// never collide even when units run on different rayon workers.
pub struct BuildScopesUseCase<B: UnitBuilder> {
    builder: B,
    policy: ScopePolicy,
    allocator: SharedIndexAllocator,
}

impl<B: UnitBuilder> BuildScopesUseCase<B> {
    pub fn new(builder: B) -> Self {
        Self::with_policy(builder, ScopePolicy::default())
    }

    pub fn with_policy(builder: B, policy: ScopePolicy) -> Self {
        Self {
            builder,
            policy,
            allocator: SharedIndexAllocator::new(),
        }
    }

    /// Continue numbering from an allocator shared with other builds
    pub fn with_allocator(mut self, allocator: SharedIndexAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    pub fn allocated_indices(&self) -> u64 {
        self.allocator.allocated()
    }

    pub fn execute(&self, units: &[B::Unit]) -> Result<Vec<UnitResult<B::Output>>> {
        let results = if cfg!(feature = "parallel") && units.len() >= PARALLEL_THRESHOLD {
            self.execute_parallel(units)
        } else {
            units.iter().map(|unit| self.build_one(unit)).collect()
        }?;

        let mut total = ScopeStats::new();
        for result in &results {
            total.absorb(&result.stats);
        }
        info!(
            units = results.len(),
            scopes = total.scopes,
            variables = total.variables,
            phi_requests = total.phi_requests,
            "scope build finished"
        );
        Ok(results)
    }

    #[cfg(feature = "parallel")]
    fn execute_parallel(&self, units: &[B::Unit]) -> Result<Vec<UnitResult<B::Output>>> {
        units.par_iter().map(|unit| self.build_one(unit)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn execute_parallel(&self, units: &[B::Unit]) -> Result<Vec<UnitResult<B::Output>>> {
        units.iter().map(|unit| self.build_one(unit)).collect()
    }

    fn build_one(&self, unit: &B::Unit) -> Result<UnitResult<B::Output>> {
        let mut tree = ScopeTree::with_policy(self.policy.clone(), self.allocator.clone());
        let output = self.builder.build_unit(unit, &mut tree)?;
        Ok(UnitResult {
            output,
            stats: tree.stats().clone(),
        })
    }
}
