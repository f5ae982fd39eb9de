use crate::features::scope::domain::ScopeId;

/// Jump capability shared by every structured-statement builder
///
/// Each call records the scope the driver is in when it meets the jump; the
/// builder decides where that scope joins. A construct that has no use for a
/// jump kind ignores it and returns `false`, so the driver can offer it to an
/// outer construct or report its own diagnostic.
pub trait Breakable {
    fn break_from(&mut self, site: ScopeId) -> bool;

    fn continue_from(&mut self, site: ScopeId) -> bool;

    fn fallthrough_from(&mut self, site: ScopeId) -> bool;
}
