//! Append-only history of one name inside one scope

use super::ids::VarId;

#[derive(Debug, Clone, Default)]
pub struct VersionChain {
    versions: Vec<VarId>,
}

impl VersionChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding, returning the version index it was given
    pub(crate) fn push(&mut self, var: VarId) -> usize {
        self.versions.push(var);
        self.versions.len() - 1
    }

    pub fn latest(&self) -> Option<VarId> {
        self.versions.last().copied()
    }

    pub fn first(&self) -> Option<VarId> {
        self.versions.first().copied()
    }

    pub fn all(&self) -> &[VarId] {
        &self.versions
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
