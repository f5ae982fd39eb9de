//! Policy I/O (YAML loading)
//!
//! Defines the YAML schema types. Loading and export live on `ScopePolicy`.

use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Base dialect preset
    pub preset: String,

    /// Fine-grained overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<PolicyOverrides>,
}

/// Policy overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_capture: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_auto_break: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthetic_prefixes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_scope_depth: Option<usize>,
}
