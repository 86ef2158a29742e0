use thiserror::Error;

/// Failure to parse raw bytes as a tabular document.
///
/// Load failures are per-file: one file failing to parse never aborts the
/// rest of a batch load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input was empty")]
    EmptyInput,
    #[error("parse error at row {row}: {reason}")]
    Parse { row: u32, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure to serialize a document back to bytes.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("csv write error: {0}")]
    Csv(#[from] csv::Error),
}

/// User-facing rejections raised by the pipeline controller.
///
/// These guard entry points; when one is returned, no mutation has occurred.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("key and fill columns must both be selected")]
    SelectionIncomplete,
    #[error("no match table has been built from the reference document")]
    MatchTableMissing,
    #[error("sheet index {index} is out of range")]
    SheetOutOfRange { index: usize },
    #[error("batch is not ready for export")]
    NotReady,
}
