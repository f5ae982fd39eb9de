//! Scope domain models

pub mod ids;
pub mod scope;
pub mod variable;
pub mod version_chain;

pub use ids::{ScopeId, VarId};
pub use scope::{Scope, ScopeKind};
pub use variable::{Variable, VariableKind};
pub use version_chain::VersionChain;
