//! Common test utilities for codegraph-ssa
//!
//! A toy instruction stream with merge/spin callbacks, and a toy front-end
//! that drives the scope core through every statement builder.

#![allow(dead_code)]

mod fixtures;
mod toy_lang;

// Re-export all utilities
pub use fixtures::*;
pub use toy_lang::*;
