/*
 * Scope Tree
 *
 * Flat arena of scopes and Variable Identities for one traversal:
 * - Scope creation (sub and shadow scopes)
 * - Variable creation, one-shot assignment, versioning
 * - Name resolution with spin placeholders for loop-carried reads
 * - Capture registration for later joins (see phi.rs)
 *
 * Handles are plain indices. A scope that is no longer used simply stops
 * being referenced; nothing is ever removed from the arena.
 */

use super::errors::{ScopeError, ScopeResult};
use super::stats::ScopeStats;
use crate::config::ScopePolicy;
use crate::features::scope::domain::{
    Scope, ScopeId, ScopeKind, VarId, Variable, VariableKind, VersionChain,
};
use crate::features::scope::ports::{IndexAllocator, LocalIndexAllocator, PlaceholderFactory};
use crate::shared::constants::scope as limits;
use ahash::AHashMap;
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use tracing::trace;

pub struct ScopeTree<T> {
    pub(super) scopes: Vec<Scope>,
    pub(super) vars: Vec<Variable<T>>,
    pub(super) factories: AHashMap<ScopeId, PlaceholderFactory<T>>,
    pub(super) stats: ScopeStats,
    allocator: Box<dyn IndexAllocator>,
    policy: ScopePolicy,
}

impl<T: Clone> ScopeTree<T> {
    /// Tree with its own index counter and the default policy
    pub fn new() -> Self {
        Self::with_allocator(LocalIndexAllocator::new())
    }

    pub fn with_allocator(allocator: impl IndexAllocator + 'static) -> Self {
        Self::with_policy(ScopePolicy::default(), allocator)
    }

    pub fn with_policy(policy: ScopePolicy, allocator: impl IndexAllocator + 'static) -> Self {
        let mut scopes = Vec::with_capacity(limits::INITIAL_SCOPE_CAPACITY);
        scopes.push(Scope::root(policy.force_capture));

        Self {
            scopes,
            vars: Vec::with_capacity(limits::INITIAL_VARIABLE_CAPACITY),
            factories: AHashMap::new(),
            stats: ScopeStats {
                scopes: 1,
                ..ScopeStats::default()
            },
            allocator: Box::new(allocator),
            policy,
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    pub fn policy(&self) -> &ScopePolicy {
        &self.policy
    }

    pub fn stats(&self) -> &ScopeStats {
        &self.stats
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn variable(&self, var: VarId) -> &Variable<T> {
        &self.vars[var.index()]
    }

    pub fn get_variable(&self, var: VarId) -> Option<&Variable<T>> {
        self.vars.get(var.index())
    }

    pub fn variable_count(&self) -> usize {
        self.vars.len()
    }

    pub fn value_of(&self, var: VarId) -> Option<&T> {
        self.vars[var.index()].value.as_ref()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Scope creation
    // ═══════════════════════════════════════════════════════════════════════

    /// Nested lexical block of `parent`
    pub fn create_sub_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.create_scope(parent, ScopeKind::Sub)
    }

    /// Continuation of `parent` (conditions, join targets)
    pub fn create_shadow_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.create_scope(parent, ScopeKind::Shadow)
    }

    /// Sub-scope that is already unreachable, for code following a `break`,
    /// `continue` or `return`. Joins skip it.
    pub fn create_unreachable_scope(&mut self, parent: ScopeId) -> ScopeId {
        let id = self.create_sub_scope(parent);
        self.mark_unreachable(id);
        id
    }

    fn create_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        match self.try_create_scope(parent, kind) {
            Ok(id) => id,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_create_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeResult<ScopeId> {
        let id = ScopeId::from_index(self.scopes.len());
        let scope = Scope::child(id, &self.scopes[parent.index()], kind);
        if scope.level > self.policy.max_scope_depth {
            return Err(ScopeError::DepthExceeded {
                depth: scope.level,
                limit: self.policy.max_scope_depth,
            });
        }

        trace!(scope = %id, parent = %parent, level = scope.level, kind = ?kind, "scope created");
        self.scopes.push(scope);
        self.stats.scopes += 1;
        Ok(id)
    }

    /// Leave a plain lexical block: a shadow of `outer` that sees every
    /// non-local write made inside the block
    pub fn leave_block(&mut self, outer: ScopeId, block_end: ScopeId) -> ScopeId {
        let next = self.create_shadow_scope(outer);
        self.cover_by(next, block_end);
        next
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.index()].parent
    }

    pub fn level(&self, scope: ScopeId) -> usize {
        self.scopes[scope.index()].level
    }

    pub fn kind(&self, scope: ScopeId) -> ScopeKind {
        self.scopes[scope.index()].kind
    }

    /// True when `ancestor` is `scope` itself or one of its ancestors
    pub fn is_visible_from(&self, ancestor: ScopeId, scope: ScopeId) -> bool {
        let target_level = self.scopes[ancestor.index()].level;
        let mut current = scope;
        loop {
            let s = &self.scopes[current.index()];
            if s.level < target_level {
                return false;
            }
            if current == ancestor {
                return true;
            }
            match s.parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    pub fn set_force_capture(&mut self, scope: ScopeId, force_capture: bool) {
        self.scopes[scope.index()].force_capture = force_capture;
    }

    /// Turn `scope` into a loop-condition scope
    ///
    /// Reads through it that resolve in an ancestor get a placeholder from
    /// `factory` until `spin` patches them.
    pub fn set_spin(&mut self, scope: ScopeId, factory: PlaceholderFactory<T>) {
        self.scopes[scope.index()].spin = true;
        self.factories.insert(scope, factory);
    }

    pub fn mark_unreachable(&mut self, scope: ScopeId) {
        trace!(scope = %scope, "scope marked unreachable");
        self.scopes[scope.index()].unreachable = true;
    }

    pub fn is_unreachable(&self, scope: ScopeId) -> bool {
        self.scopes[scope.index()].unreachable
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Variables
    // ═══════════════════════════════════════════════════════════════════════

    /// Mint an unbound Variable Identity owned by `scope`
    pub fn create_variable(&mut self, scope: ScopeId, name: &str, local: bool) -> VarId {
        let global_index = self.allocator.next_index();
        let id = VarId::from_index(self.vars.len());
        self.vars
            .push(Variable::new(id, global_index, name, local, scope));
        self.stats.variables += 1;
        id
    }

    pub fn set_variable_kind(&mut self, var: VarId, kind: VariableKind) {
        self.vars[var.index()].kind = kind;
    }

    /// Bind `value` to `var` and make it the latest version of its name
    ///
    /// # Panics
    /// On a second assignment to the same identity.
    pub fn assign_variable(&mut self, var: VarId, value: T) {
        if let Err(err) = self.try_assign_variable(var, value) {
            panic!("{}", err);
        }
    }

    pub fn try_assign_variable(&mut self, var: VarId, value: T) -> ScopeResult<()> {
        let v = self
            .vars
            .get(var.index())
            .ok_or(ScopeError::UnknownVariable { var })?;
        if v.value.is_some() {
            return Err(ScopeError::DoubleAssignment {
                name: v.name.clone(),
                global_index: v.global_index,
            });
        }

        let scope = v.scope;
        let name = v.name.clone();
        let registers = !v.local && scope != ScopeId::ROOT && !name.is_empty();
        let prev = if registers {
            self.lookup(scope, &name)
        } else {
            None
        };

        let v = &mut self.vars[var.index()];
        v.value = Some(value);
        v.version = self.scopes[scope.index()]
            .chains
            .entry(name.clone())
            .or_insert_with(VersionChain::new)
            .push(var);

        if registers {
            self.register_capture(scope, &name, var, prev);
        }
        Ok(())
    }

    /// `create_variable` followed by `assign_variable`
    pub fn write_variable(&mut self, scope: ScopeId, name: &str, local: bool, value: T) -> VarId {
        let var = self.create_variable(scope, name, local);
        self.assign_variable(var, value);
        var
    }

    fn register_capture(&mut self, scope: ScopeId, name: &str, var: VarId, prev: Option<VarId>) {
        let linked = self.vars[var.index()].capture;
        let root = if linked != var {
            linked
        } else if let Some(prev) = prev {
            self.vars[prev.index()].capture
        } else if self.scopes[scope.index()].force_capture {
            var
        } else {
            return;
        };
        self.vars[var.index()].capture = root;

        let s = &mut self.scopes[scope.index()];
        // Writing again to a binding this scope owns and never captured
        if root != var && self.vars[root.index()].scope == scope && !s.captured_roots.contains(&root)
        {
            return;
        }

        trace!(scope = %scope, name, var = %var, root = %root, "captured");
        s.captured.insert(name.to_string(), var);
        s.captured_roots.insert(root);
    }

    /// Record a side-effect binding (member or object mutation) on `scope`
    pub fn capture_side_effect(&mut self, scope: ScopeId, name: &str, var: VarId) {
        self.scopes[scope.index()]
            .captured_side_effects
            .insert(name.to_string(), var);
    }

    pub fn captured(&self, scope: ScopeId) -> &IndexMap<String, VarId> {
        &self.scopes[scope.index()].captured
    }

    pub fn captured_side_effects(&self, scope: ScopeId) -> &IndexMap<String, VarId> {
        &self.scopes[scope.index()].captured_side_effects
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Name resolution
    // ═══════════════════════════════════════════════════════════════════════

    /// Resolve `name` from `scope`, minting spin placeholders on the way
    pub fn read_variable(&mut self, scope: ScopeId, name: &str) -> Option<VarId> {
        let s = &self.scopes[scope.index()];
        if let Some(var) = s.latest(name) {
            return Some(var);
        }
        if s.unreachable {
            return None;
        }
        let parent = s.parent?;
        let spin = s.spin;

        let found = self.read_variable(parent, name)?;
        if spin && !name.is_empty() {
            return Some(self.create_placeholder(scope, name, found));
        }
        Some(found)
    }

    /// Resolve `name` in `scope` only
    pub fn read_variable_current(&self, scope: ScopeId, name: &str) -> Option<VarId> {
        self.scopes[scope.index()].latest(name)
    }

    pub fn read_value(&mut self, scope: ScopeId, name: &str) -> Option<T> {
        self.read_variable(scope, name)
            .and_then(|var| self.vars[var.index()].value.clone())
    }

    /// Resolve without side effects: no placeholders are minted
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<VarId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = &self.scopes[id.index()];
            if let Some(var) = s.latest(name) {
                return Some(var);
            }
            if s.unreachable {
                return None;
            }
            current = s.parent;
        }
        None
    }

    fn create_placeholder(&mut self, scope: ScopeId, name: &str, found: VarId) -> VarId {
        let value = match self.factories.get_mut(&scope) {
            Some(factory) => factory(name),
            None => return found,
        };

        let var = self.create_variable(scope, name, true);
        let root = self.vars[found.index()].capture;
        self.vars[var.index()].capture = root;
        self.vars[var.index()].kind = self.vars[root.index()].kind;
        self.assign_variable(var, value);

        self.scopes[scope.index()]
            .incoming_phi
            .insert(name.to_string(), var);
        self.stats.placeholders += 1;
        trace!(scope = %scope, name, placeholder = %var, root = %root, "spin placeholder");
        var
    }

    pub fn version_chain(&self, scope: ScopeId, name: &str) -> Option<&VersionChain> {
        self.scopes[scope.index()].chains.get(name)
    }

    /// Every non-synthetic name bound in `scope` or an ancestor, innermost first
    pub fn all_variable_names(&self, scope: ScopeId) -> Vec<String> {
        let mut names = IndexSet::new();
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = &self.scopes[id.index()];
            for name in s.chains.keys() {
                if !self.policy.is_synthetic(name) {
                    names.insert(name.clone());
                }
            }
            current = s.parent;
        }
        names.into_iter().collect()
    }
}

impl<T: Clone> Default for ScopeTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ScopeTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeTree")
            .field("scopes", &self.scopes.len())
            .field("variables", &self.vars.len())
            .field("pending_spins", &self.factories.len())
            .field("policy", &self.policy)
            .finish()
    }
}
