//! Scope node
//!
//! A scope owns the version chains of names written directly in it and the
//! bindings it captured from its ancestors. Scopes never own each other: the
//! tree is a flat arena and each scope stores only its parent's handle.

use super::ids::{ScopeId, VarId};
use super::version_chain::VersionChain;
use ahash::AHashSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a scope was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Root,
    /// Nested lexical block (bodies, catch clauses, latches)
    Sub,
    /// Continuation of the parent at the same lexical level (conditions, join targets)
    Shadow,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub(crate) id: ScopeId,
    pub(crate) parent: Option<ScopeId>,
    pub(crate) level: usize,
    pub(crate) kind: ScopeKind,
    pub(crate) chains: IndexMap<String, VersionChain>,
    pub(crate) captured: IndexMap<String, VarId>,
    pub(crate) captured_side_effects: IndexMap<String, VarId>,
    /// Capture roots already recorded in `captured`
    pub(crate) captured_roots: AHashSet<VarId>,
    pub(crate) incoming_phi: IndexMap<String, VarId>,
    pub(crate) spin: bool,
    pub(crate) force_capture: bool,
    pub(crate) unreachable: bool,
}

impl Scope {
    pub(crate) fn root(force_capture: bool) -> Self {
        Self::new(ScopeId::ROOT, None, 0, ScopeKind::Root, force_capture)
    }

    pub(crate) fn child(id: ScopeId, parent: &Scope, kind: ScopeKind) -> Self {
        Self::new(id, Some(parent.id), parent.level + 1, kind, parent.force_capture)
    }

    fn new(
        id: ScopeId,
        parent: Option<ScopeId>,
        level: usize,
        kind: ScopeKind,
        force_capture: bool,
    ) -> Self {
        Self {
            id,
            parent,
            level,
            kind,
            chains: IndexMap::new(),
            captured: IndexMap::new(),
            captured_side_effects: IndexMap::new(),
            captured_roots: AHashSet::new(),
            incoming_phi: IndexMap::new(),
            spin: false,
            force_capture,
            unreachable: false,
        }
    }

    pub fn id(&self) -> ScopeId {
        self.id
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn is_spin(&self) -> bool {
        self.spin
    }

    pub fn is_force_capture(&self) -> bool {
        self.force_capture
    }

    pub fn is_unreachable(&self) -> bool {
        self.unreachable
    }

    /// Version chain of a name written directly in this scope
    pub fn chain(&self, name: &str) -> Option<&VersionChain> {
        self.chains.get(name)
    }

    pub fn chains(&self) -> impl Iterator<Item = (&str, &VersionChain)> {
        self.chains.iter().map(|(name, chain)| (name.as_str(), chain))
    }

    /// Latest binding of a name in this scope only
    pub(crate) fn latest(&self, name: &str) -> Option<VarId> {
        self.chains.get(name).and_then(VersionChain::latest)
    }

    /// Bindings imported from ancestors, in first-capture order
    pub fn captured(&self) -> &IndexMap<String, VarId> {
        &self.captured
    }

    pub fn captured_side_effects(&self) -> &IndexMap<String, VarId> {
        &self.captured_side_effects
    }

    /// Placeholders minted by reads through this spin scope, pending `spin`
    pub fn incoming_phi(&self) -> &IndexMap<String, VarId> {
        &self.incoming_phi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_inherits_force_capture_and_level() {
        let root = Scope::root(true);
        let child = Scope::child(ScopeId::from_index(1), &root, ScopeKind::Sub);
        let grandchild = Scope::child(ScopeId::from_index(2), &child, ScopeKind::Shadow);

        assert_eq!(root.level(), 0);
        assert_eq!(child.level(), 1);
        assert_eq!(grandchild.level(), 2);
        assert_eq!(grandchild.parent(), Some(ScopeId::from_index(1)));
        assert!(grandchild.is_force_capture());
        assert_eq!(grandchild.kind(), ScopeKind::Shadow);
    }

    #[test]
    fn test_fresh_scope_is_empty() {
        let root = Scope::root(false);
        assert_eq!(root.parent(), None);
        assert_eq!(root.kind(), ScopeKind::Root);
        assert!(root.captured().is_empty());
        assert!(root.chain("a").is_none());
        assert!(!root.is_spin());
        assert!(!root.is_unreachable());
    }
}
