pub mod callbacks;
pub mod index_allocator;
pub mod unit_builder;

pub use callbacks::{PlaceholderFactory, SpinBindings};
pub use index_allocator::{IndexAllocator, LocalIndexAllocator, SharedIndexAllocator};
pub use unit_builder::UnitBuilder;
