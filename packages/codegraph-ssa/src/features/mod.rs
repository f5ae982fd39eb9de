pub mod control_flow;
pub mod scope;
