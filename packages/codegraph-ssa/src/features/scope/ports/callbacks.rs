//! Driver-supplied callbacks
//!
//! The core never creates merge values itself. A front-end hands in:
//!
//! - `merge_fn(name, slots) -> T`: one candidate per predecessor, in
//!   predecessor order. A slot is `None` only when the name has no binding
//!   at all on that path.
//! - `spin_fn(name, placeholder, entry, latch) -> bindings`: patches a
//!   loop-carried placeholder once both loop edges are known; the returned
//!   bindings are written into the loop condition.
//! - a `PlaceholderFactory` minting empty merge values for loop-carried reads.
//!
//! Callbacks may append to the driver's own instruction stream but must not
//! call back into the scope API.

/// Mints an empty merge value for a loop-carried name
pub type PlaceholderFactory<T> = Box<dyn FnMut(&str) -> T>;

/// Bindings returned by a spin callback
pub type SpinBindings<T> = Vec<(String, T)>;
