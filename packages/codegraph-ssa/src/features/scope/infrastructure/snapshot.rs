//! Debug snapshots of a scope's visible bindings

use super::scope_tree::ScopeTree;
use crate::features::scope::domain::{ScopeId, ScopeKind, VariableKind};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingSnapshot {
    pub name: String,
    pub global_index: u64,
    pub version: usize,
    pub local: bool,
    pub kind: VariableKind,
    pub owner: ScopeId,
    /// Global index of the capture root
    pub capture: u64,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeSnapshot {
    pub scope: ScopeId,
    pub parent: Option<ScopeId>,
    pub level: usize,
    pub kind: ScopeKind,
    pub spin: bool,
    pub unreachable: bool,
    pub bindings: Vec<BindingSnapshot>,
}

impl ScopeSnapshot {
    pub fn binding(&self, name: &str) -> Option<&BindingSnapshot> {
        self.bindings.iter().find(|b| b.name == name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<T: Clone + Debug> ScopeTree<T> {
    /// Capture what `scope` currently resolves every visible name to
    ///
    /// Resolution here never mints spin placeholders.
    pub fn snapshot(&self, scope: ScopeId) -> ScopeSnapshot {
        let s = self.scope(scope);
        let bindings = self
            .all_variable_names(scope)
            .into_iter()
            .filter_map(|name| {
                let var = self.variable(self.lookup(scope, &name)?);
                Some(BindingSnapshot {
                    name,
                    global_index: var.global_index(),
                    version: var.version(),
                    local: var.is_local(),
                    kind: var.kind(),
                    owner: var.scope(),
                    capture: self.variable(var.capture()).global_index(),
                    value: var.value().map(|v| format!("{:?}", v)),
                })
            })
            .collect();

        ScopeSnapshot {
            scope,
            parent: s.parent(),
            level: s.level(),
            kind: s.kind(),
            spin: s.is_spin(),
            unreachable: s.is_unreachable(),
            bindings,
        }
    }
}
