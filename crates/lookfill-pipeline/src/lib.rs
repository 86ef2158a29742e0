//! `lookfill-pipeline` sequences the load → fill → export stages over a batch
//! of tabular documents and owns the per-panel selection state machine.
//!
//! The crate exposes:
//! - capability traits for the external collaborators ([`DocumentLoader`],
//!   [`DocumentSerializer`], [`ExportSink`]) plus a CSV reference
//!   implementation ([`CsvTable`])
//! - an ordered [`BatchQueue`] and the [`BatchSequencer`] that drains it one
//!   document per scheduling tick
//! - the [`PipelineController`] reacting to selection-state changes
//!
//! Scheduling is cooperative and single-runtime: the sequencer yields between
//! queue items so a large batch never starves other scheduled work, and the
//! published match table is swapped as one [`std::sync::Arc`] so a fill run
//! always sees a consistent snapshot.

mod controller;
mod csv_table;
mod error;
mod io;
mod queue;
mod sequencer;

pub use controller::{PanelId, PanelStage, PanelView, PipelineController, SheetOption};
pub use csv_table::{CsvTable, CSV_MEDIA_TYPE};
pub use error::{LoadError, PipelineError, SerializeError};
pub use io::{DocumentLoader, DocumentSerializer, ExportSink};
pub use queue::{BatchQueue, QueueEntry};
pub use sequencer::{
    BatchSequencer, ExportReport, FillReport, IncomingFile, LoadOutcome, SequencerConfig,
    EXPORT_PREFIX,
};
