//! Scope Hierarchy, Version Chains and Phi Synthesis
//!
//! Name resolution and versioning for one traversal, plus the three
//! primitives (`cover_by`, `merge`, `spin`) that join scopes.
//!
//! # Architecture (Hexagonal)
//!
//! ```text
//! External Callers (front-end drivers)
//!           ↓
//! application/ (BuildScopesUseCase, multi-unit builds)
//!           ↓
//! infrastructure/ (ScopeTree arena, phi primitives)
//!           ↓
//! domain/ (ScopeId, VarId, Variable, VersionChain, Scope)
//!           ↑
//! ports/ (IndexAllocator, callbacks, UnitBuilder)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use codegraph_ssa::features::scope::infrastructure::ScopeTree;
//!
//! let mut tree: ScopeTree<u32> = ScopeTree::new();
//! let root = tree.root();
//! tree.write_variable(root, "a", false, 1);
//!
//! let block = tree.create_sub_scope(root);
//! tree.write_variable(block, "a", false, 2);
//! let after = tree.leave_block(root, block);
//! assert_eq!(tree.read_value(after, "a"), Some(2));
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;
