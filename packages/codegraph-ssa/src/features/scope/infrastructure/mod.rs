//! Scope infrastructure
//!
//! The arena (`ScopeTree`), the phi primitives implemented on it, and the
//! diagnostics around it.

pub mod errors;
pub mod phi;
pub mod scope_tree;
pub mod snapshot;
pub mod stats;

pub use errors::*;
pub use scope_tree::ScopeTree;
pub use snapshot::{BindingSnapshot, ScopeSnapshot};
pub use stats::ScopeStats;
