//! Policy validation
//!
//! Runs on `ScopePolicy::build` and after YAML loading. A policy rejected
//! here would build trees that panic on their first scope or hide every
//! name from snapshots.

use super::error::{ConfigError, ConfigResult};
use crate::shared::constants::scope::{MAX_SCOPE_DEPTH, MIN_SCOPE_DEPTH};

/// A configuration that can reject itself before a tree is built from it
///
/// # Example
/// ```rust,ignore
/// use codegraph_ssa::config::{validate_each, ScopePolicy};
///
/// let per_unit: Vec<ScopePolicy> = load_unit_policies()?;
/// validate_each(&per_unit)?;
/// ```
pub trait Validatable {
    fn validate(&self) -> ConfigResult<()>;
}

/// Validate a batch of policies (one per build unit), stopping at the first failure
pub fn validate_each<'a, V, I>(policies: I) -> ConfigResult<()>
where
    V: Validatable + 'a,
    I: IntoIterator<Item = &'a V>,
{
    policies.into_iter().try_for_each(Validatable::validate)
}

pub(crate) fn check_scope_depth(depth: usize) -> ConfigResult<()> {
    if (MIN_SCOPE_DEPTH..=MAX_SCOPE_DEPTH).contains(&depth) {
        return Ok(());
    }
    Err(ConfigError::OutOfRange {
        field: "max_scope_depth",
        value: depth,
        min: MIN_SCOPE_DEPTH,
        max: MAX_SCOPE_DEPTH,
        hint: "a tree needs one level below the root",
    })
}

pub(crate) fn check_synthetic_prefixes(prefixes: &[String]) -> ConfigResult<()> {
    if prefixes.iter().any(String::is_empty) {
        return Err(ConfigError::EmptySyntheticPrefix);
    }
    Ok(())
}
