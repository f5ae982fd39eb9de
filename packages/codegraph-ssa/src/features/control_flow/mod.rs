//! Structured-Statement Builders
//!
//! Each builder sequences `create_*_scope`, `cover_by`, `merge` and `spin`
//! for one statement kind. Builders never own the tree: every phase method
//! takes the tree, returns the scope the driver continues in, and is told
//! the scope the driver finished in.
//!
//! # Architecture (Hexagonal)
//!
//! ```text
//! Front-end driver
//!       ↓
//! domain/ (ControlFlowBuilder, ControlStack)
//!       ↓
//! infrastructure/ (If, Loop, Switch, Try, Label, Goto)
//!       ↑
//! ports/ (Breakable)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut builder = IfBuilder::new(global);
//! let cond = builder.enter_condition(&mut tree);
//! let body = builder.enter_body(&mut tree, cond);
//! tree.write_variable(body, "a", false, 2);
//! builder.exit_body(body);
//! let end = builder.build(&mut tree, |name, slots| make_phi(name, slots));
//! ```

pub mod domain;
pub mod infrastructure;
pub mod ports;
