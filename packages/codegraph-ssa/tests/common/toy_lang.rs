//! Toy structured language and the front-end that drives the scope core
//!
//! Covers every statement builder, jumps routed through `ControlStack`, and
//! `Probe` statements that record what a name resolves to at a given point.

use super::fixtures::*;
use codegraph_ssa::{
    ControlFlowBuilder, ControlStack, GotoBuilder, IfBuilder, LabelBuilder, LoopBuilder, ScopeId,
    ScopePolicy, ScopeTree, SwitchBuilder, TryBuilder, VarId,
};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub enum Expr {
    Int(i64),
    Var(String),
    Bin(BinOp, Box<Expr>, Box<Expr>),
}

pub fn int(value: i64) -> Expr {
    Expr::Int(value)
}

pub fn var(name: &str) -> Expr {
    Expr::Var(name.to_string())
}

pub fn bin(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Bin(op, Box::new(lhs), Box::new(rhs))
}

#[derive(Debug, Clone)]
pub enum Stmt {
    /// `name = expr`
    Assign(String, Expr),
    /// `let name = expr` (block local)
    Declare(String, Expr),
    Block(Vec<Stmt>),
    If {
        arms: Vec<(Expr, Vec<Stmt>)>,
        otherwise: Option<Vec<Stmt>>,
    },
    For {
        init: Vec<Stmt>,
        cond: Expr,
        post: Vec<Stmt>,
        body: Vec<Stmt>,
    },
    Switch {
        subject: Expr,
        cases: Vec<Vec<Stmt>>,
        default: Option<Vec<Stmt>>,
    },
    Try {
        body: Vec<Stmt>,
        catches: Vec<(String, Vec<Stmt>)>,
        finally: Option<Vec<Stmt>>,
    },
    Labeled(String, Box<Stmt>),
    Goto(String),
    Label(String),
    Break,
    BreakLabel(String),
    Continue,
    ContinueLabel(String),
    Fallthrough,
    Return,
    /// Record the binding of a name at this point
    Probe(String),
}

pub fn assign(name: &str, expr: Expr) -> Stmt {
    Stmt::Assign(name.to_string(), expr)
}

pub fn declare(name: &str, expr: Expr) -> Stmt {
    Stmt::Declare(name.to_string(), expr)
}

pub fn probe(name: &str) -> Stmt {
    Stmt::Probe(name.to_string())
}

pub fn if_else(cond: Expr, then: Vec<Stmt>, otherwise: Option<Vec<Stmt>>) -> Stmt {
    Stmt::If {
        arms: vec![(cond, then)],
        otherwise,
    }
}

pub fn while_loop(cond: Expr, body: Vec<Stmt>) -> Stmt {
    Stmt::For {
        init: Vec::new(),
        cond,
        post: Vec::new(),
        body,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHit {
    pub name: String,
    pub var: Option<VarId>,
    pub value: Option<ValueId>,
}

pub struct Driver {
    pub tree: ScopeTree<ValueId>,
    pub program: SharedProgram,
    pub probes: Vec<ProbeHit>,
    pub diagnostics: Vec<String>,
    stack: ControlStack<ValueId>,
    labels: HashMap<String, LabelBuilder>,
    switch_auto_break: bool,
}

impl Driver {
    pub fn new(policy: ScopePolicy) -> Self {
        let switch_auto_break = policy.switch_auto_break;
        Self {
            tree: ScopeTree::with_policy(policy, codegraph_ssa::LocalIndexAllocator::new()),
            program: new_program(),
            probes: Vec::new(),
            diagnostics: Vec::new(),
            stack: ControlStack::new(),
            labels: HashMap::new(),
            switch_auto_break,
        }
    }

    /// Run a whole program in a fresh function scope; returns its end scope
    pub fn run(&mut self, stmts: &[Stmt]) -> ScopeId {
        let global = self.tree.create_sub_scope(self.tree.root());
        self.block(global, stmts)
    }

    pub fn probe(&self, name: &str) -> &ProbeHit {
        self.probes
            .iter()
            .find(|hit| hit.name == name)
            .unwrap_or_else(|| panic!("no probe for {name}"))
    }

    pub fn probes_of(&self, name: &str) -> Vec<&ProbeHit> {
        self.probes.iter().filter(|hit| hit.name == name).collect()
    }

    pub fn constant(&mut self, value: i64) -> ValueId {
        self.program.borrow_mut().emit(Inst::Const(value))
    }

    fn block(&mut self, scope: ScopeId, stmts: &[Stmt]) -> ScopeId {
        let mut current = scope;
        for stmt in stmts {
            // Dead code after a jump builds nothing
            if self.tree.is_unreachable(current) {
                break;
            }
            current = self.stmt(current, stmt);
        }
        current
    }

    fn dead_after(&mut self, scope: ScopeId) -> ScopeId {
        self.tree.create_unreachable_scope(scope)
    }

    fn expr(&mut self, scope: ScopeId, expr: &Expr) -> ValueId {
        match expr {
            Expr::Int(value) => self.constant(*value),
            Expr::Var(name) => match self.tree.read_value(scope, name) {
                Some(value) => value,
                None => {
                    self.diagnostics.push(format!("undefined variable '{name}'"));
                    self.program.borrow_mut().emit(Inst::Undefined(name.clone()))
                }
            },
            Expr::Bin(op, lhs, rhs) => {
                let lhs = self.expr(scope, lhs);
                let rhs = self.expr(scope, rhs);
                self.program.borrow_mut().emit(Inst::Binary { op: *op, lhs, rhs })
            }
        }
    }

    fn stmt(&mut self, scope: ScopeId, stmt: &Stmt) -> ScopeId {
        match stmt {
            Stmt::Assign(name, expr) => {
                let value = self.expr(scope, expr);
                self.tree.write_variable(scope, name, false, value);
                scope
            }
            Stmt::Declare(name, expr) => {
                let value = self.expr(scope, expr);
                self.tree.write_variable(scope, name, true, value);
                scope
            }
            Stmt::Block(stmts) => {
                let inner = self.tree.create_sub_scope(scope);
                let end = self.block(inner, stmts);
                if self.tree.is_unreachable(end) {
                    return self.dead_after(scope);
                }
                self.tree.leave_block(scope, end)
            }
            Stmt::If { arms, otherwise } => self.if_stmt(scope, arms, otherwise.as_deref()),
            Stmt::For {
                init,
                cond,
                post,
                body,
            } => self.for_stmt(scope, None, init, cond, post, body),
            Stmt::Switch {
                subject,
                cases,
                default,
            } => self.switch_stmt(scope, None, subject, cases, default.as_deref()),
            Stmt::Try {
                body,
                catches,
                finally,
            } => self.try_stmt(scope, body, catches, finally.as_deref()),
            Stmt::Labeled(label, inner) => self.labeled(scope, label, inner),
            Stmt::Goto(label) => {
                let target = self
                    .labels
                    .entry(label.clone())
                    .or_insert_with(|| LabelBuilder::new(label.clone()));
                if !GotoBuilder::new(scope, label.clone()).finish(target) {
                    self.diagnostics.push(format!("backward goto '{label}' is not supported"));
                }
                self.dead_after(scope)
            }
            Stmt::Label(label) => {
                let target = self
                    .labels
                    .entry(label.clone())
                    .or_insert_with(|| LabelBuilder::new(label.clone()));
                target.place(&mut self.tree, scope, merge_fn(&self.program))
            }
            Stmt::Break => {
                if !self.stack.break_from(scope) {
                    self.diagnostics.push("break outside loop or switch".to_string());
                }
                self.dead_after(scope)
            }
            Stmt::BreakLabel(label) => {
                if !self.stack.break_to_label(label, scope) {
                    self.diagnostics.push(format!("unknown label '{label}'"));
                }
                self.dead_after(scope)
            }
            Stmt::Continue => {
                if !self.stack.continue_from(scope) {
                    self.diagnostics.push("continue outside loop".to_string());
                }
                self.dead_after(scope)
            }
            Stmt::ContinueLabel(label) => {
                if !self.stack.continue_to_label(label, scope) {
                    self.diagnostics.push(format!("label '{label}' is not a loop"));
                }
                self.dead_after(scope)
            }
            Stmt::Fallthrough => {
                if !self.stack.fallthrough_from(scope) {
                    self.diagnostics.push("fallthrough outside switch case".to_string());
                }
                self.dead_after(scope)
            }
            Stmt::Return => self.dead_after(scope),
            Stmt::Probe(name) => {
                let var = self.tree.read_variable(scope, name);
                let value = var.and_then(|var| self.tree.value_of(var).copied());
                self.probes.push(ProbeHit {
                    name: name.clone(),
                    var,
                    value,
                });
                scope
            }
        }
    }

    fn if_stmt(&mut self, scope: ScopeId, arms: &[(Expr, Vec<Stmt>)], otherwise: Option<&[Stmt]>) -> ScopeId {
        let mut builder = IfBuilder::new(scope);
        for (cond, body) in arms {
            let cond_scope = builder.enter_condition(&mut self.tree);
            self.expr(cond_scope, cond);
            let body_scope = builder.enter_body(&mut self.tree, cond_scope);
            let body_end = self.block(body_scope, body);
            builder.exit_body(body_end);
        }
        if let Some(stmts) = otherwise {
            let else_scope = builder.enter_else(&mut self.tree);
            let else_end = self.block(else_scope, stmts);
            builder.exit_else(else_end);
        }
        builder.build(&mut self.tree, merge_fn(&self.program))
    }

    fn for_stmt(
        &mut self,
        scope: ScopeId,
        label: Option<&str>,
        init: &[Stmt],
        cond: &Expr,
        post: &[Stmt],
        body: &[Stmt],
    ) -> ScopeId {
        let mut lp = LoopBuilder::new(scope, placeholder_factory(&self.program));
        let header = lp.enter_header(&mut self.tree);
        let header_end = self.block(header, init);
        let cond_scope = lp.enter_condition(&mut self.tree, header_end);
        self.expr(cond_scope, cond);
        let body_scope = lp.enter_body(&mut self.tree, cond_scope);

        match label {
            Some(label) => self.stack.push_labeled(label, lp),
            None => self.stack.push(lp),
        }
        let body_end = self.block(body_scope, body);
        let mut lp = self.pop_loop();

        let latch = lp.enter_latch(&mut self.tree, body_end, merge_fn(&self.program));
        let latch_end = self.block(latch, post);
        lp.finish(
            &mut self.tree,
            latch_end,
            spin_fn(&self.program),
            merge_fn(&self.program),
        )
    }

    fn pop_loop(&mut self) -> LoopBuilder<ValueId> {
        self.stack
            .pop()
            .and_then(ControlFlowBuilder::into_loop)
            .expect("loop frame on top of the control stack")
    }

    fn switch_stmt(
        &mut self,
        scope: ScopeId,
        label: Option<&str>,
        subject: &Expr,
        cases: &[Vec<Stmt>],
        default: Option<&[Stmt]>,
    ) -> ScopeId {
        let mut sw = SwitchBuilder::new(scope, self.switch_auto_break);
        let cond = sw.enter_condition(&mut self.tree);
        self.expr(cond, subject);
        sw.exit_condition(cond);
        match label {
            Some(label) => self.stack.push_labeled(label, sw),
            None => self.stack.push(sw),
        }

        let bodies = cases.iter().map(|body| (false, body.as_slice()));
        let default = default.map(|body| (true, body));
        for (is_default, body) in bodies.chain(default) {
            let sw = self
                .stack
                .top_mut()
                .and_then(ControlFlowBuilder::as_switch_mut)
                .expect("switch frame on top of the control stack");
            let case = if is_default {
                sw.enter_default(&mut self.tree, merge_fn(&self.program))
            } else {
                sw.enter_case(&mut self.tree, merge_fn(&self.program))
            };
            let case_end = self.block(case, body);
            self.stack
                .top_mut()
                .and_then(ControlFlowBuilder::as_switch_mut)
                .expect("switch frame on top of the control stack")
                .exit_case(&self.tree, case_end);
        }

        let sw = self
            .stack
            .pop()
            .and_then(ControlFlowBuilder::into_switch)
            .expect("switch frame on top of the control stack");
        sw.finish(&mut self.tree, merge_fn(&self.program))
    }

    fn try_stmt(
        &mut self,
        scope: ScopeId,
        body: &[Stmt],
        catches: &[(String, Vec<Stmt>)],
        finally: Option<&[Stmt]>,
    ) -> ScopeId {
        let mut builder = TryBuilder::new(scope);
        let try_scope = builder.enter_try(&mut self.tree);
        let try_end = self.block(try_scope, body);
        builder.exit_try(try_end);

        for (error_name, stmts) in catches {
            let (catch, error) = builder.enter_catch(&mut self.tree, error_name, merge_fn(&self.program));
            if let Some(error) = error {
                let value = self.program.borrow_mut().emit(Inst::Param(error_name.clone()));
                self.tree.assign_variable(error, value);
            }
            let catch_end = self.block(catch, stmts);
            builder.exit_catch(catch_end);
        }

        if let Some(stmts) = finally {
            let finally_scope = builder.enter_finally(&mut self.tree, merge_fn(&self.program));
            let finally_end = self.block(finally_scope, stmts);
            builder.exit_finally(finally_end);
        }
        builder.finish(&mut self.tree, merge_fn(&self.program))
    }

    fn labeled(&mut self, scope: ScopeId, label: &str, inner: &Stmt) -> ScopeId {
        match inner {
            Stmt::For {
                init,
                cond,
                post,
                body,
            } => self.for_stmt(scope, Some(label), init, cond, post, body),
            Stmt::Switch {
                subject,
                cases,
                default,
            } => self.switch_stmt(scope, Some(label), subject, cases, default.as_deref()),
            other => {
                self.stack.push_labeled(label, LabelBuilder::new(label));
                let inner_scope = self.tree.create_sub_scope(scope);
                let end = self.stmt(inner_scope, other);
                let frame = self
                    .stack
                    .pop()
                    .and_then(ControlFlowBuilder::into_label)
                    .expect("label frame on top of the control stack");
                let joined = frame.finish(&mut self.tree, end, merge_fn(&self.program));
                if self.tree.is_unreachable(joined) {
                    return self.dead_after(scope);
                }
                self.tree.leave_block(scope, joined)
            }
        }
    }
}
