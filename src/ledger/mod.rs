//! Replacement ledger types.
//!
//! - [`Ledger`] - Append-only record of every replacement in a stream
//! - [`LedgerEntry`] - Absolute source and destination span of one replacement

mod entry;
mod record;

pub use entry::LedgerEntry;
pub use record::Ledger;

pub(crate) use record::Record;
