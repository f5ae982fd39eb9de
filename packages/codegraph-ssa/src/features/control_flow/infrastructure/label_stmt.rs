//! Labels and gotos
//!
//! A label collects the scopes its forward gotos jumped from. Placing it
//! opens a shadow scope that merges those sites with whatever falls into the
//! label. Labeled statements also take `break` for early exits; `finish`
//! joins them at the end of the statement.

use crate::features::control_flow::ports::Breakable;
use crate::features::scope::domain::ScopeId;
use crate::features::scope::infrastructure::ScopeTree;
use tracing::debug;

/// Closest scope at or above `scope` that is still reachable
fn reachable_anchor<T: Clone>(tree: &ScopeTree<T>, scope: ScopeId) -> ScopeId {
    let mut current = scope;
    while tree.is_unreachable(current) {
        match tree.parent(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }
    current
}

/// Shadow of the reachable part of `current` joined with `sites`
fn join_at<T, F>(tree: &mut ScopeTree<T>, current: ScopeId, sites: &[ScopeId], merge_fn: F) -> ScopeId
where
    T: Clone,
    F: FnMut(&str, &[Option<T>]) -> T,
{
    let falls_in = !tree.is_unreachable(current);
    let anchor = reachable_anchor(tree, current);
    let target = tree.create_shadow_scope(anchor);
    tree.merge(target, falls_in, sites, merge_fn);
    target
}

#[derive(Debug, Clone)]
pub struct LabelBuilder {
    name: String,
    gotos: Vec<ScopeId>,
    breaks: Vec<ScopeId>,
    target: Option<ScopeId>,
}

impl LabelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gotos: Vec::new(),
            breaks: Vec::new(),
            target: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scope opened by `place`, once placed
    pub fn target(&self) -> Option<ScopeId> {
        self.target
    }

    pub fn goto_scopes(&self) -> &[ScopeId] {
        &self.gotos
    }

    pub fn break_scopes(&self) -> &[ScopeId] {
        &self.breaks
    }

    /// Record a forward jump; jumps after `place` are backward and ignored
    pub fn add_goto(&mut self, site: ScopeId) -> bool {
        if self.target.is_some() {
            return false;
        }
        if !self.gotos.contains(&site) {
            self.gotos.push(site);
        }
        true
    }

    /// Put the label where the driver stands and continue in the returned scope
    pub fn place<T, F>(&mut self, tree: &mut ScopeTree<T>, current: ScopeId, merge_fn: F) -> ScopeId
    where
        T: Clone,
        F: FnMut(&str, &[Option<T>]) -> T,
    {
        let target = join_at(tree, current, &self.gotos, merge_fn);
        self.target = Some(target);
        debug!(label = %self.name, target = %target, gotos = self.gotos.len(), "label placed");
        target
    }

    /// Close a labeled statement, joining every `break` aimed at it
    pub fn finish<T, F>(self, tree: &mut ScopeTree<T>, block_end: ScopeId, merge_fn: F) -> ScopeId
    where
        T: Clone,
        F: FnMut(&str, &[Option<T>]) -> T,
    {
        let end = join_at(tree, block_end, &self.breaks, merge_fn);
        debug!(label = %self.name, end = %end, breaks = self.breaks.len(), "labeled statement finished");
        end
    }
}

impl Breakable for LabelBuilder {
    fn break_from(&mut self, site: ScopeId) -> bool {
        if !self.breaks.contains(&site) {
            self.breaks.push(site);
        }
        true
    }

    fn continue_from(&mut self, _site: ScopeId) -> bool {
        false
    }

    fn fallthrough_from(&mut self, _site: ScopeId) -> bool {
        false
    }
}

/// One `goto L` (or `break L`) waiting to be attached to its label
#[derive(Debug, Clone)]
pub struct GotoBuilder {
    site: ScopeId,
    label: String,
    is_break: bool,
}

impl GotoBuilder {
    pub fn new(site: ScopeId, label: impl Into<String>) -> Self {
        Self {
            site,
            label: label.into(),
            is_break: false,
        }
    }

    /// Route to the label's end instead of its placement
    pub fn as_break(mut self) -> Self {
        self.is_break = true;
        self
    }

    pub fn site(&self) -> ScopeId {
        self.site
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Hand the jump to `label`; `false` when it names another label or
    /// jumps backwards
    pub fn finish(self, label: &mut LabelBuilder) -> bool {
        if label.name() != self.label {
            return false;
        }
        if self.is_break {
            label.break_from(self.site)
        } else {
            label.add_goto(self.site)
        }
    }
}

/// A goto is itself a jump; it routes nothing
impl Breakable for GotoBuilder {
    fn break_from(&mut self, _site: ScopeId) -> bool {
        false
    }

    fn continue_from(&mut self, _site: ScopeId) -> bool {
        false
    }

    fn fallthrough_from(&mut self, _site: ScopeId) -> bool {
        false
    }
}
