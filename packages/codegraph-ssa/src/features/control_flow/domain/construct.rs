//! Enclosing-construct bookkeeping for front-end drivers
//!
//! `ControlFlowBuilder` closes the set of statement builders under one type
//! so a driver can keep them on a single stack. `ControlStack` routes a jump
//! to the innermost construct that takes it.

use crate::features::control_flow::infrastructure::{
    GotoBuilder, IfBuilder, LabelBuilder, LoopBuilder, SwitchBuilder, TryBuilder,
};
use crate::features::control_flow::ports::Breakable;
use crate::features::scope::domain::ScopeId;
use std::fmt;
use tracing::trace;

pub enum ControlFlowBuilder<T> {
    If(IfBuilder),
    Loop(LoopBuilder<T>),
    Switch(SwitchBuilder),
    Try(TryBuilder),
    Label(LabelBuilder),
    Goto(GotoBuilder),
}

macro_rules! delegate {
    ($self:ident, $b:ident => $body:expr) => {
        match $self {
            ControlFlowBuilder::If($b) => $body,
            ControlFlowBuilder::Loop($b) => $body,
            ControlFlowBuilder::Switch($b) => $body,
            ControlFlowBuilder::Try($b) => $body,
            ControlFlowBuilder::Label($b) => $body,
            ControlFlowBuilder::Goto($b) => $body,
        }
    };
}

impl<T> ControlFlowBuilder<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            ControlFlowBuilder::If(_) => "if",
            ControlFlowBuilder::Loop(_) => "loop",
            ControlFlowBuilder::Switch(_) => "switch",
            ControlFlowBuilder::Try(_) => "try",
            ControlFlowBuilder::Label(_) => "label",
            ControlFlowBuilder::Goto(_) => "goto",
        }
    }

    pub fn as_if_mut(&mut self) -> Option<&mut IfBuilder> {
        match self {
            ControlFlowBuilder::If(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_loop_mut(&mut self) -> Option<&mut LoopBuilder<T>> {
        match self {
            ControlFlowBuilder::Loop(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_switch_mut(&mut self) -> Option<&mut SwitchBuilder> {
        match self {
            ControlFlowBuilder::Switch(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_try_mut(&mut self) -> Option<&mut TryBuilder> {
        match self {
            ControlFlowBuilder::Try(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_label_mut(&mut self) -> Option<&mut LabelBuilder> {
        match self {
            ControlFlowBuilder::Label(b) => Some(b),
            _ => None,
        }
    }

    pub fn into_if(self) -> Option<IfBuilder> {
        match self {
            ControlFlowBuilder::If(b) => Some(b),
            _ => None,
        }
    }

    pub fn into_loop(self) -> Option<LoopBuilder<T>> {
        match self {
            ControlFlowBuilder::Loop(b) => Some(b),
            _ => None,
        }
    }

    pub fn into_switch(self) -> Option<SwitchBuilder> {
        match self {
            ControlFlowBuilder::Switch(b) => Some(b),
            _ => None,
        }
    }

    pub fn into_try(self) -> Option<TryBuilder> {
        match self {
            ControlFlowBuilder::Try(b) => Some(b),
            _ => None,
        }
    }

    pub fn into_label(self) -> Option<LabelBuilder> {
        match self {
            ControlFlowBuilder::Label(b) => Some(b),
            _ => None,
        }
    }
}

impl<T> Breakable for ControlFlowBuilder<T> {
    fn break_from(&mut self, site: ScopeId) -> bool {
        delegate!(self, b => b.break_from(site))
    }

    fn continue_from(&mut self, site: ScopeId) -> bool {
        delegate!(self, b => b.continue_from(site))
    }

    fn fallthrough_from(&mut self, site: ScopeId) -> bool {
        delegate!(self, b => b.fallthrough_from(site))
    }
}

impl<T> fmt::Debug for ControlFlowBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        delegate!(self, b => fmt::Debug::fmt(b, f))
    }
}

impl<T> From<IfBuilder> for ControlFlowBuilder<T> {
    fn from(b: IfBuilder) -> Self {
        ControlFlowBuilder::If(b)
    }
}

impl<T> From<LoopBuilder<T>> for ControlFlowBuilder<T> {
    fn from(b: LoopBuilder<T>) -> Self {
        ControlFlowBuilder::Loop(b)
    }
}

impl<T> From<SwitchBuilder> for ControlFlowBuilder<T> {
    fn from(b: SwitchBuilder) -> Self {
        ControlFlowBuilder::Switch(b)
    }
}

impl<T> From<TryBuilder> for ControlFlowBuilder<T> {
    fn from(b: TryBuilder) -> Self {
        ControlFlowBuilder::Try(b)
    }
}

impl<T> From<LabelBuilder> for ControlFlowBuilder<T> {
    fn from(b: LabelBuilder) -> Self {
        ControlFlowBuilder::Label(b)
    }
}

impl<T> From<GotoBuilder> for ControlFlowBuilder<T> {
    fn from(b: GotoBuilder) -> Self {
        ControlFlowBuilder::Goto(b)
    }
}

#[derive(Debug)]
struct Frame<T> {
    label: Option<String>,
    builder: ControlFlowBuilder<T>,
}

/// Stack of the constructs enclosing the driver's position
#[derive(Debug)]
pub struct ControlStack<T> {
    frames: Vec<Frame<T>>,
}

impl<T> Default for ControlStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ControlStack<T> {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn push(&mut self, builder: impl Into<ControlFlowBuilder<T>>) {
        self.frames.push(Frame {
            label: None,
            builder: builder.into(),
        });
    }

    /// Push a construct a `break L` / `continue L` can name
    pub fn push_labeled(&mut self, label: impl Into<String>, builder: impl Into<ControlFlowBuilder<T>>) {
        self.frames.push(Frame {
            label: Some(label.into()),
            builder: builder.into(),
        });
    }

    pub fn pop(&mut self) -> Option<ControlFlowBuilder<T>> {
        self.frames.pop().map(|frame| frame.builder)
    }

    pub fn top_mut(&mut self) -> Option<&mut ControlFlowBuilder<T>> {
        self.frames.last_mut().map(|frame| &mut frame.builder)
    }

    /// Unlabeled `break`: innermost loop or switch
    ///
    /// Label frames only take breaks that name them.
    pub fn break_from(&mut self, site: ScopeId) -> bool {
        self.route(site, "break", |frame, site| {
            !matches!(frame.builder, ControlFlowBuilder::Label(_)) && frame.builder.break_from(site)
        })
    }

    pub fn continue_from(&mut self, site: ScopeId) -> bool {
        self.route(site, "continue", |frame, site| frame.builder.continue_from(site))
    }

    pub fn fallthrough_from(&mut self, site: ScopeId) -> bool {
        self.route(site, "fallthrough", |frame, site| frame.builder.fallthrough_from(site))
    }

    /// `break L`: the frame labeled `L` takes the jump
    pub fn break_to_label(&mut self, label: &str, site: ScopeId) -> bool {
        match self.labeled_frame(label) {
            Some(frame) => frame.builder.break_from(site),
            None => false,
        }
    }

    /// `continue L`: only a labeled loop takes it
    pub fn continue_to_label(&mut self, label: &str, site: ScopeId) -> bool {
        match self.labeled_frame(label) {
            Some(frame) => frame.builder.continue_from(site),
            None => false,
        }
    }

    fn labeled_frame(&mut self, label: &str) -> Option<&mut Frame<T>> {
        self.frames
            .iter_mut()
            .rev()
            .find(|frame| frame.label.as_deref() == Some(label))
    }

    fn route<F>(&mut self, site: ScopeId, jump: &'static str, mut accept: F) -> bool
    where
        F: FnMut(&mut Frame<T>, ScopeId) -> bool,
    {
        for (depth, frame) in self.frames.iter_mut().rev().enumerate() {
            if accept(frame, site) {
                trace!(jump, site = %site, depth, construct = frame.builder.kind(), "jump routed");
                return true;
            }
        }
        false
    }
}
