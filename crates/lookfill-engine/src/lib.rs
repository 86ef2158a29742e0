//! `lookfill-engine` is the pure join-and-fill core:
//!
//! - [`header`] / [`column`] read a sheet's header row and column extracts
//! - [`MatchTable`] builds the key→value lookup from two parallel extracts
//! - [`fill`] writes looked-up values into a target sheet's fill column
//!
//! Everything here is synchronous and side-effect-free except [`fill`], which
//! mutates its sheet in place. Batch sequencing and selection state live in
//! `lookfill-pipeline`.

mod accessor;
mod fill;
mod match_table;

pub use accessor::{column, header, HeaderEntry};
pub use fill::{fill, FillOutcome};
pub use match_table::MatchTable;
