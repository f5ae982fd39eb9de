/*
 * Codegraph SSA - Scope-driven SSA Construction Core
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Constants
 * - config/      : Scope policy (dialect presets, overrides, YAML)
 * - features/    : Vertical slices (scope tree + phi primitives → statement builders)
 *
 * Every codegraph front-end drives one ScopeTree per traversal. The tree
 * resolves names to versioned Variable Identities and asks the driver for
 * phi values only at joins (cover_by / merge / spin); the statement
 * builders sequence those joins for if, loop, switch, try and goto.
 */

// Crate-level lint configuration
#![allow(clippy::type_complexity)] // Callback signatures are spelled out
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::derivable_impls)] // Manual impl for documentation
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::len_without_is_empty)] // Counters, not collections

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Policy configuration (presets, overrides, YAML)
pub mod config;

/// Crate-level error type
pub mod errors;

/// Feature modules (scope, control_flow)
pub mod features;

/// Shared constants
pub mod shared;

// Re-export the driver-facing surface
pub use config::{ConfigError, Dialect, ScopePolicy};
pub use errors::{CodegraphSsaError, Result};
pub use features::control_flow::domain::{ControlFlowBuilder, ControlStack};
pub use features::control_flow::infrastructure::{
    GotoBuilder, IfBuilder, LabelBuilder, LoopBuilder, SwitchBuilder, TryBuilder,
};
pub use features::control_flow::ports::Breakable;
pub use features::scope::application::{BuildScopesUseCase, UnitResult};
pub use features::scope::domain::{ScopeId, ScopeKind, VarId, Variable, VariableKind, VersionChain};
pub use features::scope::infrastructure::{ScopeError, ScopeSnapshot, ScopeStats, ScopeTree};
pub use features::scope::ports::{
    IndexAllocator, LocalIndexAllocator, PlaceholderFactory, SharedIndexAllocator, SpinBindings,
    UnitBuilder,
};
