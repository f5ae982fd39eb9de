//! Error types for codegraph-ssa
//!
//! Provides unified error handling across the crate.

use crate::config::ConfigError;
use crate::features::scope::infrastructure::ScopeError;
use thiserror::Error;

/// Main error type for codegraph-ssa operations
#[derive(Debug, Error)]
pub enum CodegraphSsaError {
    /// Scope tree or builder usage error
    #[error("Scope error: {0}")]
    Scope(#[from] ScopeError),

    /// Policy configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Front-end error raised while driving a build unit
    #[error("Front-end error: {0}")]
    FrontEnd(String),
}

impl CodegraphSsaError {
    /// Create a front-end error
    pub fn front_end(msg: impl Into<String>) -> Self {
        CodegraphSsaError::FrontEnd(msg.into())
    }
}

/// Result type alias for codegraph-ssa operations
pub type Result<T> = std::result::Result<T, CodegraphSsaError>;
