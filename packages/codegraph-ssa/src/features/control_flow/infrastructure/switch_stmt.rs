//! Switch / case
//!
//! ```text
//! global ─shadow→ condition … condition_end ─sub→ case₁
//!                                          ├─sub→ case₂ (merged with case₁ on fallthrough)
//!                                          └─shadow→ end = merge(exits…)
//! ```
//!
//! With `auto_break` a case that reaches its end leaves the switch. Without
//! it the end scope flows into the next case unless the case broke out or
//! ended unreachable. An explicit `fallthrough` always chains.

use crate::config::ScopePolicy;
use crate::features::control_flow::ports::Breakable;
use crate::features::scope::domain::ScopeId;
use crate::features::scope::infrastructure::{ScopeError, ScopeTree};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ready,
    Condition,
    Cases,
    Case,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Condition => "condition",
            Phase::Cases => "cases",
            Phase::Case => "case",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SwitchBuilder {
    global: ScopeId,
    auto_break: bool,
    condition_end: Option<ScopeId>,
    exits: Vec<ScopeId>,
    /// Where the previous case fell through from
    pending_fallthrough: Option<ScopeId>,
    /// Explicit `fallthrough` seen in the open case
    fallthrough_site: Option<ScopeId>,
    has_default: bool,
    cases: usize,
    phase: Phase,
}

impl SwitchBuilder {
    pub fn new(global: ScopeId, auto_break: bool) -> Self {
        Self {
            global,
            auto_break,
            condition_end: None,
            exits: Vec::new(),
            pending_fallthrough: None,
            fallthrough_site: None,
            has_default: false,
            cases: 0,
            phase: Phase::Ready,
        }
    }

    /// Builder following the dialect's fall-through rule
    pub fn for_policy(global: ScopeId, policy: &ScopePolicy) -> Self {
        Self::new(global, policy.switch_auto_break)
    }

    fn expect(&self, expected: Phase) {
        if self.phase != expected {
            panic!("{}", ScopeError::phase("switch", expected.as_str(), self.phase.as_str()));
        }
    }

    pub fn enter_condition<T: Clone>(&mut self, tree: &mut ScopeTree<T>) -> ScopeId {
        self.expect(Phase::Ready);
        self.phase = Phase::Condition;
        tree.create_shadow_scope(self.global)
    }

    pub fn exit_condition(&mut self, condition_end: ScopeId) {
        self.expect(Phase::Condition);
        self.condition_end = Some(condition_end);
        self.phase = Phase::Cases;
    }

    pub fn enter_case<T, F>(&mut self, tree: &mut ScopeTree<T>, merge_fn: F) -> ScopeId
    where
        T: Clone,
        F: FnMut(&str, &[Option<T>]) -> T,
    {
        self.open_case(tree, merge_fn)
    }

    pub fn enter_default<T, F>(&mut self, tree: &mut ScopeTree<T>, merge_fn: F) -> ScopeId
    where
        T: Clone,
        F: FnMut(&str, &[Option<T>]) -> T,
    {
        self.has_default = true;
        self.open_case(tree, merge_fn)
    }

    fn open_case<T, F>(&mut self, tree: &mut ScopeTree<T>, merge_fn: F) -> ScopeId
    where
        T: Clone,
        F: FnMut(&str, &[Option<T>]) -> T,
    {
        self.expect(Phase::Cases);
        let Some(condition_end) = self.condition_end else {
            panic!("{}", ScopeError::phase("switch", "condition", "case"));
        };

        let case = tree.create_sub_scope(condition_end);
        if let Some(previous) = self.pending_fallthrough.take() {
            // Entered either by matching or by falling out of the previous case
            tree.merge(case, true, &[previous], merge_fn);
            trace!(case = %case, from = %previous, "case entered by fallthrough");
        }

        self.cases += 1;
        self.phase = Phase::Case;
        case
    }

    pub fn exit_case<T: Clone>(&mut self, tree: &ScopeTree<T>, case_end: ScopeId) {
        self.expect(Phase::Case);
        let explicit = self.fallthrough_site.take();
        let broke = self.exits.contains(&case_end);
        let dead = tree.is_unreachable(case_end);

        let falls = explicit.is_some() || (!self.auto_break && !broke && !dead);
        if falls {
            self.pending_fallthrough = Some(explicit.unwrap_or(case_end));
        } else if !broke && !dead {
            self.exits.push(case_end);
        }
        self.phase = Phase::Cases;
    }

    /// Join every case exit and return the scope after the switch
    pub fn finish<T, F>(mut self, tree: &mut ScopeTree<T>, merge_fn: F) -> ScopeId
    where
        T: Clone,
        F: FnMut(&str, &[Option<T>]) -> T,
    {
        self.expect(Phase::Cases);
        let Some(condition_end) = self.condition_end else {
            panic!("{}", ScopeError::phase("switch", "condition", "finish"));
        };
        // The last case falls out of the switch
        if let Some(last) = self.pending_fallthrough.take() {
            if !self.exits.contains(&last) {
                self.exits.push(last);
            }
        }

        let end = tree.create_shadow_scope(condition_end);
        let has_self = !self.has_default;
        tree.merge(end, has_self, &self.exits, merge_fn);

        debug!(
            end = %end,
            cases = self.cases,
            exits = self.exits.len(),
            has_default = self.has_default,
            "switch finished"
        );
        end
    }

    pub fn exit_scopes(&self) -> &[ScopeId] {
        &self.exits
    }

    pub fn is_auto_break(&self) -> bool {
        self.auto_break
    }
}

impl Breakable for SwitchBuilder {
    fn break_from(&mut self, site: ScopeId) -> bool {
        if !self.exits.contains(&site) {
            self.exits.push(site);
        }
        true
    }

    /// `continue` belongs to the enclosing loop
    fn continue_from(&mut self, _site: ScopeId) -> bool {
        false
    }

    fn fallthrough_from(&mut self, site: ScopeId) -> bool {
        if self.phase != Phase::Case {
            return false;
        }
        self.fallthrough_site = Some(site);
        true
    }
}
