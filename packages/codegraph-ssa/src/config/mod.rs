//! Scope Policy Configuration
//!
//! Every scope tree is built under a `ScopePolicy`. Three levels:
//! - Level 1: Dialect preset (most front-ends)
//! - Level 2: Builder overrides
//! - Level 3: YAML file
//!
//! # Examples
//!
//! ```rust,ignore
//! use codegraph_ssa::config::{Dialect, ScopePolicy};
//!
//! // Level 1
//! let policy = ScopePolicy::preset(Dialect::Go);
//!
//! // Level 2
//! let policy = ScopePolicy::preset(Dialect::C).switch_auto_break(true).build()?;
//!
//! // Level 3
//! let policy = ScopePolicy::from_yaml("scope-policy.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod preset;
pub mod scope_policy;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use io::{PolicyExportV1, PolicyOverrides};
pub use preset::Dialect;
pub use scope_policy::ScopePolicy;
pub use validation::{validate_each, Validatable};
