/*
 * Phi-Synthesis Primitives
 *
 * The only operations that ask the driver for merge values:
 * - cover_by: successor adopts a finished scope's view (no branching)
 * - merge:    N-way join of sibling scopes
 * - spin:     patch loop-carried placeholders once the back edge is known
 *
 * What a finished scope exports to a join target is read off the `captured`
 * maps on the path from that scope up to the first scope the target can
 * see. Bindings are grouped by capture root, so "the same variable reached
 * through two sibling branches" is a plain handle comparison.
 */

use super::scope_tree::ScopeTree;
use crate::features::scope::domain::{ScopeId, VarId};
use crate::features::scope::ports::SpinBindings;
use indexmap::IndexMap;
use tracing::debug;

/// Capture root -> (name, binding) exported by one scope towards a target
type ExportedView = IndexMap<VarId, (String, VarId)>;

impl<T: Clone> ScopeTree<T> {
    /// Bindings `source` exports to `target`, innermost write per root
    ///
    /// With `own_definitions`, names first defined on the path (never
    /// captured) are exported as well.
    fn exported_view(&self, source: ScopeId, target: ScopeId, own_definitions: bool) -> ExportedView {
        let mut view = ExportedView::new();
        let mut current = Some(source);

        while let Some(id) = current {
            if self.is_visible_from(id, target) {
                break;
            }
            let scope = &self.scopes[id.index()];

            for (name, &var) in &scope.captured {
                let root = self.vars[var.index()].capture;
                if self.propagates(root, target) {
                    view.entry(root).or_insert_with(|| (name.clone(), var));
                }
            }

            if own_definitions {
                for (name, chain) in &scope.chains {
                    let Some(latest) = chain.latest() else { continue };
                    let v = &self.vars[latest.index()];
                    let root = v.capture;
                    let owned_here = self.vars[root.index()].scope == id
                        && !scope.captured_roots.contains(&root);
                    if !v.local && owned_here && self.propagates(root, target) {
                        view.entry(root).or_insert_with(|| (name.clone(), latest));
                    }
                }
            }

            current = scope.parent;
        }

        view
    }

    /// Block-local roots never leave the block that declared them
    fn propagates(&self, root: VarId, target: ScopeId) -> bool {
        let r = &self.vars[root.index()];
        !r.local || self.is_visible_from(r.scope, target)
    }

    fn exported_side_effects(&self, source: ScopeId, target: ScopeId) -> IndexMap<String, VarId> {
        let mut effects = IndexMap::new();
        let mut current = Some(source);
        while let Some(id) = current {
            if self.is_visible_from(id, target) {
                break;
            }
            let scope = &self.scopes[id.index()];
            for (name, &var) in &scope.captured_side_effects {
                effects.entry(name.clone()).or_insert(var);
            }
            current = scope.parent;
        }
        effects
    }

    fn absorb_side_effects(&mut self, target: ScopeId, effects: IndexMap<String, VarId>) {
        let target_effects = &mut self.scopes[target.index()].captured_side_effects;
        for (name, var) in effects {
            target_effects.insert(name, var);
        }
    }

    /// Write a join result into `target`, linked to `root` when known
    fn write_joined(&mut self, target: ScopeId, name: &str, root: Option<VarId>, value: T) -> VarId {
        let var = self.create_variable(target, name, false);
        if let Some(root) = root {
            self.vars[var.index()].capture = root;
            self.vars[var.index()].kind = self.vars[root.index()].kind;
        }
        self.assign_variable(var, value);
        var
    }

    /// Value of the binding rooted at `root` as `target` sees it
    ///
    /// A same-named declaration closer to `target` that belongs to another
    /// root is stepped over rather than read.
    fn read_root_value(&mut self, target: ScopeId, name: &str, root: VarId) -> Option<T> {
        let found = self.read_variable(target, name)?;
        if self.vars[found.index()].capture == root {
            return self.vars[found.index()].value.clone();
        }

        let mut current = Some(target);
        while let Some(id) = current {
            let s = &self.scopes[id.index()];
            if let Some(var) = s.latest(name) {
                if self.vars[var.index()].capture == root {
                    return self.vars[var.index()].value.clone();
                }
            }
            if s.unreachable {
                return None;
            }
            current = s.parent;
        }
        None
    }

    // ═══════════════════════════════════════════════════════════════════════
    // CoverBy
    // ═══════════════════════════════════════════════════════════════════════

    /// Make `target` see every binding `source` changed or introduced
    pub fn cover_by(&mut self, target: ScopeId, source: ScopeId) {
        let view = self.exported_view(source, target, true);
        let effects = self.exported_side_effects(source, target);

        let mut covered = 0;
        for (root, (name, var)) in view {
            if let Some(value) = self.vars[var.index()].value.clone() {
                self.write_joined(target, &name, Some(root), value);
                covered += 1;
            }
        }
        self.absorb_side_effects(target, effects);

        self.stats.covers += 1;
        debug!(target = %target, source = %source, bindings = covered, "cover_by");
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Merge
    // ═══════════════════════════════════════════════════════════════════════

    /// Join `siblings` into `target`
    ///
    /// For every binding touched by a sibling, `merge_fn` receives one
    /// slot per sibling in call order, followed by the target's own pre-merge
    /// value when `has_self` is set. A sibling that never touched the root
    /// contributes the target's pre-merge value. Unreachable siblings are
    /// skipped; with nothing left to join and no self slot the target
    /// becomes unreachable.
    ///
    /// A binding is its capture root when that root is visible from
    /// `target`. Roots first defined inside a sibling are joined by name.
    pub fn merge<F>(&mut self, target: ScopeId, has_self: bool, siblings: &[ScopeId], mut merge_fn: F)
    where
        F: FnMut(&str, &[Option<T>]) -> T,
    {
        let live: Vec<ScopeId> = siblings
            .iter()
            .copied()
            .filter(|&s| !self.scopes[s.index()].unreachable)
            .collect();

        if live.is_empty() && !has_self {
            self.mark_unreachable(target);
            self.stats.merges += 1;
            debug!(target = %target, siblings = siblings.len(), "merge: no reachable predecessor");
            return;
        }

        let views: Vec<ExportedView> = live
            .iter()
            .map(|&sibling| self.exported_view(sibling, target, false))
            .collect();

        // A root minted inside a sibling is invisible from `target`; same-named
        // fresh roots from different siblings join as one binding under the
        // first root seen
        let mut fresh: IndexMap<String, VarId> = IndexMap::new();
        let mut groups: IndexMap<VarId, String> = IndexMap::new();
        let mut keyed: Vec<IndexMap<VarId, VarId>> = Vec::with_capacity(views.len());
        for view in &views {
            let mut entries = IndexMap::with_capacity(view.len());
            for (root, (name, var)) in view {
                let key = if self.is_visible_from(self.vars[root.index()].scope, target) {
                    *root
                } else {
                    *fresh.entry(name.clone()).or_insert(*root)
                };
                groups.entry(key).or_insert_with(|| name.clone());
                entries.entry(key).or_insert(*var);
            }
            keyed.push(entries);
        }

        // Pre-merge values are read before any write-back lands in `target`
        let base: Vec<Option<T>> = groups
            .iter()
            .map(|(root, name)| self.read_root_value(target, name, *root))
            .collect();

        let mut phis = 0;
        for ((root, name), base) in groups.iter().zip(base) {
            let mut slots: Vec<Option<T>> = Vec::with_capacity(keyed.len() + usize::from(has_self));
            for entries in &keyed {
                match entries.get(root) {
                    Some(var) => slots.push(self.vars[var.index()].value.clone()),
                    None => slots.push(base.clone()),
                }
            }
            if has_self {
                slots.push(base);
            }
            if slots.is_empty() {
                continue;
            }

            let merged = merge_fn(name.as_str(), &slots);
            self.write_joined(target, name, Some(*root), merged);
            phis += 1;
        }

        for &sibling in &live {
            let effects = self.exported_side_effects(sibling, target);
            self.absorb_side_effects(target, effects);
        }

        self.stats.merges += 1;
        self.stats.phi_requests += phis;
        debug!(target = %target, siblings = live.len(), has_self, phis, "merge");
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Spin
    // ═══════════════════════════════════════════════════════════════════════

    /// Close a loop whose condition scope is `condition`
    ///
    /// `header` is the scope the loop was entered from and `latch` the join
    /// of every back edge. Each pending placeholder, and each name the latch
    /// changed without it ever being read through the condition, is handed
    /// to `spin_fn` with its entry and back-edge values; the returned
    /// bindings are written into `condition`. Afterwards `condition` is an
    /// ordinary scope.
    pub fn spin<F>(&mut self, condition: ScopeId, header: ScopeId, latch: ScopeId, mut spin_fn: F)
    where
        F: FnMut(&str, T, Option<T>, Option<T>) -> SpinBindings<T>,
    {
        let mut factory = self.factories.remove(&condition);
        let cond = &mut self.scopes[condition.index()];
        cond.spin = false;
        let incoming: Vec<(String, VarId)> = cond.incoming_phi.drain(..).collect();

        let mut pending: IndexMap<String, (VarId, Option<T>)> = IndexMap::new();
        for (name, placeholder) in incoming {
            let v = &self.vars[placeholder.index()];
            pending.insert(name, (v.capture, v.value.clone()));
        }
        for (root, (name, _)) in self.exported_view(latch, condition, false) {
            pending.entry(name).or_insert((root, None));
        }

        let mut patched = 0;
        for (name, (root, placeholder)) in pending {
            let placeholder = match placeholder {
                Some(value) => value,
                None => match factory.as_mut() {
                    Some(factory) => factory(name.as_str()),
                    None => continue,
                },
            };
            let entry = self.read_value(header, &name);
            let back_edge = self.read_value(latch, &name);

            for (bound, value) in spin_fn(name.as_str(), placeholder, entry, back_edge) {
                let bound_root = if bound == name {
                    Some(root)
                } else {
                    self.lookup(condition, &bound)
                        .map(|var| self.vars[var.index()].capture)
                };
                self.write_joined(condition, &bound, bound_root, value);
            }
            patched += 1;
        }

        self.stats.spins += 1;
        self.stats.phi_requests += patched;
        debug!(condition = %condition, header = %header, latch = %latch, phis = patched, "spin");
    }
}
