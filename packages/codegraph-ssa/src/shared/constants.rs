//! Centralized constants
//!
//! Tunable defaults and capacity hints for the scope core.

/// Scope tree limits and capacity hints
pub mod scope {
    /// Default nesting limit below the root
    pub const DEFAULT_MAX_SCOPE_DEPTH: usize = 4096;

    /// Valid range for `max_scope_depth`
    pub const MIN_SCOPE_DEPTH: usize = 1;
    pub const MAX_SCOPE_DEPTH: usize = 1_000_000;

    /// Initial arena capacity (a typical function body opens a few dozen scopes)
    pub const INITIAL_SCOPE_CAPACITY: usize = 64;

    /// Initial variable arena capacity
    pub const INITIAL_VARIABLE_CAPACITY: usize = 256;
}

/// Policy file schema
pub mod policy {
    pub const SCHEMA_VERSION: u32 = 1;

    /// Prefix front-ends use for compiler-generated temporaries
    pub const DEFAULT_SYNTHETIC_PREFIX: &str = "#";
}

/// Multi-unit builds
pub mod parallel {
    /// Below this many units a sequential build beats rayon's dispatch overhead
    pub const PARALLEL_THRESHOLD: usize = 4;
}
