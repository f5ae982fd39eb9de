//! Try / catch / finally
//!
//! ```text
//! global ─sub→ try … try_end
//!        ├─sub→ catchᵢ   = merge(try_end, self)
//!        ├─sub→ finally  = merge(try_end, catch_ends…)
//!        └─shadow→ end   = cover(finally_end) | merge(try_end, catch_ends…)
//! ```

use crate::features::control_flow::ports::Breakable;
use crate::features::scope::domain::{ScopeId, VarId};
use crate::features::scope::infrastructure::{ScopeError, ScopeTree};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ready,
    Try,
    Handlers,
    Catch,
    Finally,
    Done,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Try => "try",
            Phase::Handlers => "handlers",
            Phase::Catch => "catch",
            Phase::Finally => "finally",
            Phase::Done => "done",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TryBuilder {
    global: ScopeId,
    try_end: Option<ScopeId>,
    catches: Vec<ScopeId>,
    finally_end: Option<ScopeId>,
    phase: Phase,
}

impl TryBuilder {
    pub fn new(global: ScopeId) -> Self {
        Self {
            global,
            try_end: None,
            catches: Vec::new(),
            finally_end: None,
            phase: Phase::Ready,
        }
    }

    fn expect(&self, expected: Phase) {
        if self.phase != expected {
            panic!("{}", ScopeError::phase("try", expected.as_str(), self.phase.as_str()));
        }
    }

    fn try_end(&self) -> ScopeId {
        match self.try_end {
            Some(end) => end,
            None => panic!("{}", ScopeError::phase("try", "try", self.phase.as_str())),
        }
    }

    /// Predecessors of the code after the handlers, in source order
    fn protected_exits(&self) -> Vec<ScopeId> {
        let mut exits = Vec::with_capacity(1 + self.catches.len());
        exits.push(self.try_end());
        exits.extend(self.catches.iter().copied());
        exits
    }

    pub fn enter_try<T: Clone>(&mut self, tree: &mut ScopeTree<T>) -> ScopeId {
        self.expect(Phase::Ready);
        self.phase = Phase::Try;
        tree.create_sub_scope(self.global)
    }

    pub fn exit_try(&mut self, try_end: ScopeId) {
        self.expect(Phase::Try);
        self.try_end = Some(try_end);
        self.phase = Phase::Handlers;
    }

    /// Open a catch clause
    ///
    /// The handler may run after any prefix of the try body, so it starts
    /// from a join of the try end and the state before the try. The returned
    /// identity is the clause's error binding, declared local and left for
    /// the driver to assign; `None` when the clause binds no name.
    pub fn enter_catch<T, F>(
        &mut self,
        tree: &mut ScopeTree<T>,
        error_name: &str,
        merge_fn: F,
    ) -> (ScopeId, Option<VarId>)
    where
        T: Clone,
        F: FnMut(&str, &[Option<T>]) -> T,
    {
        self.expect(Phase::Handlers);
        let catch = tree.create_sub_scope(self.global);
        tree.merge(catch, true, &[self.try_end()], merge_fn);

        let error = (!error_name.is_empty()).then(|| tree.create_variable(catch, error_name, true));
        self.phase = Phase::Catch;
        (catch, error)
    }

    pub fn exit_catch(&mut self, catch_end: ScopeId) {
        self.expect(Phase::Catch);
        self.catches.push(catch_end);
        self.phase = Phase::Handlers;
    }

    pub fn enter_finally<T, F>(&mut self, tree: &mut ScopeTree<T>, merge_fn: F) -> ScopeId
    where
        T: Clone,
        F: FnMut(&str, &[Option<T>]) -> T,
    {
        self.expect(Phase::Handlers);
        let finally = tree.create_sub_scope(self.global);
        tree.merge(finally, false, &self.protected_exits(), merge_fn);
        self.phase = Phase::Finally;
        finally
    }

    pub fn exit_finally(&mut self, finally_end: ScopeId) {
        self.expect(Phase::Finally);
        self.finally_end = Some(finally_end);
        self.phase = Phase::Done;
    }

    pub fn catch_count(&self) -> usize {
        self.catches.len()
    }

    /// Return the scope after the whole statement
    pub fn finish<T, F>(self, tree: &mut ScopeTree<T>, merge_fn: F) -> ScopeId
    where
        T: Clone,
        F: FnMut(&str, &[Option<T>]) -> T,
    {
        if !matches!(self.phase, Phase::Handlers | Phase::Done) {
            panic!("{}", ScopeError::phase("try", "handlers", self.phase.as_str()));
        }

        let end = tree.create_shadow_scope(self.global);
        match self.finally_end {
            Some(finally_end) => tree.cover_by(end, finally_end),
            None => tree.merge(end, false, &self.protected_exits(), merge_fn),
        }

        debug!(
            end = %end,
            catches = self.catches.len(),
            has_finally = self.finally_end.is_some(),
            "try finished"
        );
        end
    }
}

/// Jumps out of a try body are routed by the enclosing construct
impl Breakable for TryBuilder {
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
