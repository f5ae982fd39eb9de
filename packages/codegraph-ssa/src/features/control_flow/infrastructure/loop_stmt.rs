//! Loops (`for` / `while` / `do`)
//!
//! ```text
//! global ─shadow→ header … header_end ─shadow→ condition (spin) … condition_end
//!                                                 ├─shadow→ body … body_end
//!                                                 └─sub→ latch  = merge(body_end, continues…)
//! exit = shadow(global), covered by header_end, merged with breaks
//! ```
//!
//! Reads through the condition before the back edge exists get placeholders;
//! `finish` hands them to `spin_fn` together with the entry and latch values.

use crate::features::control_flow::ports::Breakable;
use crate::features::scope::domain::ScopeId;
use crate::features::scope::infrastructure::{ScopeError, ScopeTree};
use crate::features::scope::ports::{PlaceholderFactory, SpinBindings};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ready,
    Header,
    Condition,
    Body,
    Latch,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Header => "header",
            Phase::Condition => "condition",
            Phase::Body => "body",
            Phase::Latch => "latch",
        }
    }
}

pub struct LoopBuilder<T> {
    global: ScopeId,
    factory: Option<PlaceholderFactory<T>>,
    header_end: Option<ScopeId>,
    condition: Option<ScopeId>,
    condition_end: Option<ScopeId>,
    breaks: Vec<ScopeId>,
    continues: Vec<ScopeId>,
    phase: Phase,
}

impl<T: Clone> LoopBuilder<T> {
    pub fn new(global: ScopeId, factory: PlaceholderFactory<T>) -> Self {
        Self {
            global,
            factory: Some(factory),
            header_end: None,
            condition: None,
            condition_end: None,
            breaks: Vec::new(),
            continues: Vec::new(),
            phase: Phase::Ready,
        }
    }

    fn expect(&self, expected: Phase) {
        if self.phase != expected {
            panic!("{}", ScopeError::phase("loop", expected.as_str(), self.phase.as_str()));
        }
    }

    /// Scope for the init clause (`for i := 0; …`)
    pub fn enter_header(&mut self, tree: &mut ScopeTree<T>) -> ScopeId {
        self.expect(Phase::Ready);
        self.phase = Phase::Header;
        tree.create_shadow_scope(self.global)
    }

    /// Condition scope; every iteration re-enters here
    pub fn enter_condition(&mut self, tree: &mut ScopeTree<T>, header_end: ScopeId) -> ScopeId {
        self.expect(Phase::Header);
        let condition = tree.create_shadow_scope(header_end);
        if let Some(factory) = self.factory.take() {
            tree.set_spin(condition, factory);
        }
        self.header_end = Some(header_end);
        self.condition = Some(condition);
        self.phase = Phase::Condition;
        condition
    }

    pub fn enter_body(&mut self, tree: &mut ScopeTree<T>, condition_end: ScopeId) -> ScopeId {
        self.expect(Phase::Condition);
        self.condition_end = Some(condition_end);
        self.phase = Phase::Body;
        tree.create_shadow_scope(condition_end)
    }

    /// Join the body end with every `continue` site; the returned scope
    /// holds the post clause (`i++`)
    pub fn enter_latch<F>(&mut self, tree: &mut ScopeTree<T>, body_end: ScopeId, merge_fn: F) -> ScopeId
    where
        F: FnMut(&str, &[Option<T>]) -> T,
    {
        self.expect(Phase::Body);
        let condition_end = self.condition_end.unwrap_or(ScopeId::ROOT);
        let latch = tree.create_sub_scope(condition_end);

        let mut back_edges = Vec::with_capacity(1 + self.continues.len());
        back_edges.push(body_end);
        back_edges.extend(self.continues.iter().copied());
        tree.merge(latch, false, &back_edges, merge_fn);

        self.phase = Phase::Latch;
        latch
    }

    /// Close the loop and return the scope after it
    pub fn finish<S, F>(self, tree: &mut ScopeTree<T>, latch_end: ScopeId, spin_fn: S, merge_fn: F) -> ScopeId
    where
        S: FnMut(&str, T, Option<T>, Option<T>) -> SpinBindings<T>,
        F: FnMut(&str, &[Option<T>]) -> T,
    {
        self.expect(Phase::Latch);
        let (Some(header_end), Some(condition), Some(condition_end)) =
            (self.header_end, self.condition, self.condition_end)
        else {
            panic!("{}", ScopeError::phase("loop", "latch", "finish"));
        };

        tree.spin(condition, header_end, latch_end, spin_fn);
        tree.cover_by(header_end, condition_end);

        let exit = tree.create_shadow_scope(self.global);
        tree.cover_by(exit, header_end);
        tree.merge(exit, true, &self.breaks, merge_fn);

        debug!(
            exit = %exit,
            breaks = self.breaks.len(),
            continues = self.continues.len(),
            "loop finished"
        );
        exit
    }

    pub fn break_scopes(&self) -> &[ScopeId] {
        &self.breaks
    }

    pub fn continue_scopes(&self) -> &[ScopeId] {
        &self.continues
    }

    pub fn condition(&self) -> Option<ScopeId> {
        self.condition
    }
}

impl<T> Breakable for LoopBuilder<T> {
    fn break_from(&mut self, site: ScopeId) -> bool {
        if !self.breaks.contains(&site) {
            self.breaks.push(site);
        }
        true
    }

    fn continue_from(&mut self, site: ScopeId) -> bool {
        if !self.continues.contains(&site) {
            self.continues.push(site);
        }
        true
    }

    fn fallthrough_from(&mut self, _site: ScopeId) -> bool {
        false
    }
}

impl<T> fmt::Debug for LoopBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopBuilder")
            .field("global", &self.global)
            .field("condition", &self.condition)
            .field("breaks", &self.breaks)
            .field("continues", &self.continues)
            .field("phase", &self.phase)
            .finish()
    }
}
