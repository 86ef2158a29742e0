//! `lookfill-model` defines the core in-memory tabular data structures.
//!
//! The crate is intentionally self-contained so it can be reused by:
//! - the join-and-fill engine (`lookfill-engine`)
//! - document load/serialize collaborators (`lookfill-pipeline`)
//! - IPC boundaries via `serde` (JSON-safe schema)
//!
//! Rows are 1-indexed throughout (row 1 is the header row by convention);
//! columns use letter-style [`ColRef`] references.

mod cell;
mod colref;
mod document;
mod extract;
mod sheet;
mod value;

pub use cell::{CellKey, MAX_COLS, MAX_ROWS};
pub use colref::{ColRef, ColRefParseError};
pub use document::Document;
pub use extract::ColumnExtract;
pub use sheet::Sheet;
pub use value::CellValue;
