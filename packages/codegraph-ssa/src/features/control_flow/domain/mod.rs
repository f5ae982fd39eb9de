//! Control-flow domain models

pub mod construct;

pub use construct::{ControlFlowBuilder, ControlStack};
