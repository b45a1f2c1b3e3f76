//! Incremental multi-source result aggregation and ranking.
//!
//! Source producers stream complete replacement batches at arbitrary times
//! from their own threads; this module merges each batch into one globally
//! ordered list, applies the minimal visible mutation to reach the new state,
//! and keeps a selection cursor valid across every change. [`ResultsList`] is
//! the public entry point; the supporting modules hold the merge, patch and
//! cursor pieces it composes.

mod cursor;
mod list;
mod merge;
mod patch;
mod store;

pub use list::{ListConfig, ResultsList, ResultsSnapshot};
pub use patch::{ListPatch, PatchOp};

/// Top margin the shell applies while the list is visible.
pub const TOP_MARGIN: u16 = 8;

/// Height one result row occupies in the shell's height hint.
pub const ROW_HEIGHT: u32 = 75;
