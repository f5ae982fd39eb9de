pub mod if_stmt;
pub mod label_stmt;
pub mod loop_stmt;
pub mod switch_stmt;
pub mod try_stmt;

pub use if_stmt::IfBuilder;
pub use label_stmt::{GotoBuilder, LabelBuilder};
pub use loop_stmt::LoopBuilder;
pub use switch_stmt::SwitchBuilder;
pub use try_stmt::TryBuilder;
