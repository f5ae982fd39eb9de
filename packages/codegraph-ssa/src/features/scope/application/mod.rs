pub mod build_scopes;

pub use build_scopes::{BuildScopesUseCase, UnitResult};
