//! Toy instruction stream
//!
//! Values are indices into `Program::insts`. The merge and spin callbacks
//! emit phis into the stream, the way a real front-end would.

use codegraph_ssa::PlaceholderFactory;
use std::cell::RefCell;
use std::rc::Rc;

pub type ValueId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Lt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    Const(i64),
    /// Bound by the environment (catch errors, parameters)
    Param(String),
    /// Read of a name with no binding
    Undefined(String),
    Binary {
        op: BinOp,
        lhs: ValueId,
        rhs: ValueId,
    },
    /// Loop-carried value not patched yet
    Placeholder(String),
    Phi {
        name: String,
        edges: Vec<Option<ValueId>>,
    },
}

#[derive(Debug, Default)]
pub struct Program {
    pub insts: Vec<Inst>,
}

impl Program {
    pub fn emit(&mut self, inst: Inst) -> ValueId {
        self.insts.push(inst);
        self.insts.len() - 1
    }

    pub fn inst(&self, value: ValueId) -> &Inst {
        &self.insts[value]
    }

    /// Turn a placeholder into a phi in place, keeping its value id
    pub fn patch_placeholder(&mut self, value: ValueId, edges: Vec<Option<ValueId>>) {
        let name = match &self.insts[value] {
            Inst::Placeholder(name) => name.clone(),
            other => panic!("value {value} is not a placeholder: {other:?}"),
        };
        self.insts[value] = Inst::Phi { name, edges };
    }

    pub fn phis(&self) -> Vec<(ValueId, &Inst)> {
        self.insts
            .iter()
            .enumerate()
            .filter(|(_, inst)| matches!(inst, Inst::Phi { .. }))
            .collect()
    }

    pub fn phi_edges(&self, value: ValueId) -> Option<&[Option<ValueId>]> {
        match &self.insts[value] {
            Inst::Phi { edges, .. } => Some(edges),
            _ => None,
        }
    }

    pub fn constant_of(&self, value: ValueId) -> Option<i64> {
        match self.insts[value] {
            Inst::Const(c) => Some(c),
            _ => None,
        }
    }

    pub fn count_placeholders(&self) -> usize {
        self.insts
            .iter()
            .filter(|inst| matches!(inst, Inst::Placeholder(_)))
            .count()
    }
}

pub type SharedProgram = Rc<RefCell<Program>>;

pub fn new_program() -> SharedProgram {
    Rc::new(RefCell::new(Program::default()))
}

/// Merge callback: one phi per request, edges in slot order
///
/// A join whose slots all carry the same value is that value.
pub fn merge_fn(program: &SharedProgram) -> impl FnMut(&str, &[Option<ValueId>]) -> ValueId {
    let program = Rc::clone(program);
    move |name: &str, slots: &[Option<ValueId>]| {
        if let [Some(first), rest @ ..] = slots {
            if rest.iter().all(|slot| *slot == Some(*first)) {
                return *first;
            }
        }
        program.borrow_mut().emit(Inst::Phi {
            name: name.to_string(),
            edges: slots.to_vec(),
        })
    }
}

/// Spin callback: patch the placeholder with [entry, latch] and keep its id
pub fn spin_fn(
    program: &SharedProgram,
) -> impl FnMut(&str, ValueId, Option<ValueId>, Option<ValueId>) -> Vec<(String, ValueId)> {
    let program = Rc::clone(program);
    move |name: &str, placeholder: ValueId, entry: Option<ValueId>, latch: Option<ValueId>| {
        program
            .borrow_mut()
            .patch_placeholder(placeholder, vec![entry, latch]);
        vec![(name.to_string(), placeholder)]
    }
}

pub fn placeholder_factory(program: &SharedProgram) -> PlaceholderFactory<ValueId> {
    let program = Rc::clone(program);
    Box::new(move |name: &str| program.borrow_mut().emit(Inst::Placeholder(name.to_string())))
}

/// Merge callback that records the slots and answers with a counter
pub fn recording_merge(
    calls: &mut Vec<(String, Vec<Option<i32>>)>,
) -> impl FnMut(&str, &[Option<i32>]) -> i32 + '_ {
    move |name: &str, slots: &[Option<i32>]| {
        calls.push((name.to_string(), slots.to_vec()));
        1000 + calls.len() as i32
    }
}
