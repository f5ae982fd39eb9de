//! Arena handles
//!
//! Scopes and variables live in flat arenas owned by a `ScopeTree`; everything
//! else refers to them through these copyable indices. Two handles are equal
//! exactly when they name the same arena slot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a scope inside one `ScopeTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The root scope of every tree
    pub const ROOT: ScopeId = ScopeId(0);

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

/// Handle of a variable identity inside one `ScopeTree`
///
/// Unlike the global index stamped on a `Variable`, a `VarId` is only
/// meaningful for the tree that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(u32);

impl VarId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "var#{}", self.0)
    }
}
