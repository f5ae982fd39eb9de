//! If / elif / else
//!
//! ```text
//! global ─shadow→ cond₁ … cond₁_end ─shadow→ cond₂ … cond₂_end ─shadow→ end
//!                        └─sub→ body₁               ├─sub→ body₂
//!                                                   └─sub→ else
//! ```
//!
//! Each condition continues the previous one, so side effects of earlier
//! conditions are visible to later conditions and bodies. `end` merges the
//! bodies in order; without an else the untaken path is the self slot.

use crate::features::control_flow::ports::Breakable;
use crate::features::scope::domain::ScopeId;
use crate::features::scope::infrastructure::{ScopeError, ScopeTree};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ready,
    Condition,
    Body,
    Else,
    ElseDone,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Condition => "condition",
            Phase::Body => "body",
            Phase::Else => "else",
            Phase::ElseDone => "else done",
        }
    }
}

#[derive(Debug, Clone)]
pub struct IfBuilder {
    global: ScopeId,
    last_condition_end: Option<ScopeId>,
    bodies: Vec<ScopeId>,
    else_end: Option<ScopeId>,
    phase: Phase,
}

impl IfBuilder {
    pub fn new(global: ScopeId) -> Self {
        Self {
            global,
            last_condition_end: None,
            bodies: Vec::new(),
            else_end: None,
            phase: Phase::Ready,
        }
    }

    fn expect(&self, expected: Phase) {
        if self.phase != expected {
            panic!("{}", ScopeError::phase("if", expected.as_str(), self.phase.as_str()));
        }
    }

    fn reject_after_else(&self) {
        if matches!(self.phase, Phase::Else | Phase::ElseDone) {
            panic!("{}", ScopeError::ElseAlreadyBuilt);
        }
    }

    /// Open the next `if`/`elif` condition
    pub fn enter_condition<T: Clone>(&mut self, tree: &mut ScopeTree<T>) -> ScopeId {
        self.reject_after_else();
        self.expect(Phase::Ready);
        let parent = self.last_condition_end.unwrap_or(self.global);
        self.phase = Phase::Condition;
        tree.create_shadow_scope(parent)
    }

    /// Open the body guarded by the condition that ended in `condition_end`
    pub fn enter_body<T: Clone>(&mut self, tree: &mut ScopeTree<T>, condition_end: ScopeId) -> ScopeId {
        self.expect(Phase::Condition);
        self.last_condition_end = Some(condition_end);
        self.phase = Phase::Body;
        tree.create_sub_scope(condition_end)
    }

    pub fn exit_body(&mut self, body_end: ScopeId) {
        self.expect(Phase::Body);
        self.bodies.push(body_end);
        self.phase = Phase::Ready;
    }

    pub fn enter_else<T: Clone>(&mut self, tree: &mut ScopeTree<T>) -> ScopeId {
        self.reject_after_else();
        self.expect(Phase::Ready);
        let Some(condition_end) = self.last_condition_end else {
            panic!("{}", ScopeError::phase("if", "a condition", "else"));
        };
        self.phase = Phase::Else;
        tree.create_sub_scope(condition_end)
    }

    pub fn exit_else(&mut self, else_end: ScopeId) {
        self.expect(Phase::Else);
        self.else_end = Some(else_end);
        self.phase = Phase::ElseDone;
    }

    pub fn has_else(&self) -> bool {
        self.else_end.is_some()
    }

    /// Join every branch and return the scope after the statement
    pub fn build<T, F>(self, tree: &mut ScopeTree<T>, merge_fn: F) -> ScopeId
    where
        T: Clone,
        F: FnMut(&str, &[Option<T>]) -> T,
    {
        if !matches!(self.phase, Phase::Ready | Phase::ElseDone) {
            panic!("{}", ScopeError::phase("if", "a closed branch", self.phase.as_str()));
        }
        let Some(condition_end) = self.last_condition_end else {
            panic!("{}", ScopeError::phase("if", "a condition", "build"));
        };

        let end = tree.create_shadow_scope(condition_end);
        let mut branches = self.bodies;
        branches.extend(self.else_end);
        let has_self = self.else_end.is_none();
        tree.merge(end, has_self, &branches, merge_fn);

        debug!(end = %end, branches = branches.len(), has_else = !has_self, "if built");
        end
    }
}

/// Jumps pass through an `if` to the enclosing construct
impl Breakable for IfBuilder {
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
