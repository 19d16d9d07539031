//! Replace engine for rewriting byte streams.
//!
//! - [`Replacer`] - Stateful single-rule engine with `transform()`/`reset()` API

mod engine;

pub use engine::Replacer;
