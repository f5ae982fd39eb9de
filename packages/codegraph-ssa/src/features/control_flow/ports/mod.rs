pub mod breakable;

pub use breakable::Breakable;
