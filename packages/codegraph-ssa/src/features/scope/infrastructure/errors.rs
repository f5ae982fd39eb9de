/*
 * Scope Error Types
 *
 * Usage errors raised by the scope tree and the statement builders:
 * - One-shot assignment violations
 * - Stale or foreign handles
 * - Runaway nesting
 * - Builder phases called out of order
 *
 * These describe a broken driver, not bad input. The panicking entry points
 * format them as their panic message; the `try_*` entry points return them.
 */

use crate::features::scope::domain::VarId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// A Variable Identity was bound to a value a second time
    #[error("Double assignment: variable '{name}' (global index {global_index}) is already bound")]
    DoubleAssignment { name: String, global_index: u64 },

    /// Handle does not belong to this tree
    #[error("Unknown variable handle {var}")]
    UnknownVariable { var: VarId },

    /// Scope nesting went past the configured limit
    #[error("Scope depth {depth} exceeds the configured limit of {limit}")]
    DepthExceeded { depth: usize, limit: usize },

    /// An `if` item was added after the else branch
    #[error("Cannot add a branch after the else branch was built")]
    ElseAlreadyBuilt,

    /// A builder phase was entered out of order
    #[error("{builder} builder: expected {expected}, found {found}")]
    PhaseOrder {
        builder: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

pub type ScopeResult<T> = Result<T, ScopeError>;

impl ScopeError {
    pub(crate) fn phase(builder: &'static str, expected: &'static str, found: &'static str) -> Self {
        Self::PhaseOrder {
            builder,
            expected,
            found,
        }
    }
}
