//! Variable identity
//!
//! One `Variable` exists per write. It is minted unbound, bound to a value
//! exactly once, and never deleted.

use super::ids::{ScopeId, VarId};
use serde::{Deserialize, Serialize};

/// How the driver treats the storage behind a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    #[default]
    Normal,
    /// Variable stands for a memory location (e.g. a Go pointer receiver)
    Pointer,
}

/// A single versioned binding of a name
#[derive(Debug, Clone)]
pub struct Variable<T> {
    pub(crate) id: VarId,
    pub(crate) name: String,
    pub(crate) local: bool,
    pub(crate) global_index: u64,
    pub(crate) version: usize,
    pub(crate) scope: ScopeId,
    pub(crate) capture: VarId,
    pub(crate) kind: VariableKind,
    pub(crate) value: Option<T>,
}

impl<T> Variable<T> {
    pub(crate) fn new(id: VarId, global_index: u64, name: &str, local: bool, scope: ScopeId) -> Self {
        Self {
            id,
            name: name.to_string(),
            local,
            global_index,
            version: 0,
            scope,
            capture: id,
            kind: VariableKind::Normal,
            value: None,
        }
    }

    pub fn id(&self) -> VarId {
        self.id
    }

    /// Source name; empty for anonymous values
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local bindings never propagate out of the block that declared them
    pub fn is_local(&self) -> bool {
        self.local
    }

    /// Process-wide index stamped at creation
    pub fn global_index(&self) -> u64 {
        self.global_index
    }

    /// Position in the owning scope's version chain (0 until assigned)
    pub fn version(&self) -> usize {
        self.version
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Canonical binding this variable represents; itself for capture roots
    pub fn capture(&self) -> VarId {
        self.capture
    }

    pub fn is_capture_root(&self) -> bool {
        self.capture == self.id
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn is_assigned(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}
