//! Multi-rule pipelines.
//!
//! - [`Chain`] - Runs transformers in sequence, each on the previous one's output
//! - [`RuleTable`] - Ordered `pattern -> replacement` rules
//! - [`replace_all`] - Builds a [`Chain`] of [`Replacer`](crate::Replacer)s from a table

mod pipeline;
mod table;

pub use pipeline::Chain;
pub use table::{ByteRules, CharRules, RuleTable, StringRules, replace_all, replace_all_with_config};
