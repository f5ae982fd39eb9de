use crate::errors::Result;
use crate::features::scope::infrastructure::ScopeTree;

/// Front-end entry point for one independent build unit (a file or a function)
///
/// The use case hands each unit a fresh tree; the builder drives it and
/// returns whatever it produced.
pub trait UnitBuilder: Send + Sync {
    type Unit: Sync;
    type Value: Clone;
    type Output: Send;

    fn build_unit(&self, unit: &Self::Unit, tree: &mut ScopeTree<Self::Value>) -> Result<Self::Output>;
}
