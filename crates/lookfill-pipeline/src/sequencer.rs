use std::sync::Arc;
use std::time::Duration;

use lookfill_engine::{fill, FillOutcome, MatchTable};
use lookfill_model::ColRef;

use crate::error::{LoadError, PipelineError, SerializeError};
use crate::io::{DocumentLoader, DocumentSerializer, ExportSink};
use crate::queue::BatchQueue;

/// Prefix prepended to the original file name to mark an export as processed.
pub const EXPORT_PREFIX: &str = "filled-";

#[derive(Clone, Debug)]
pub struct SequencerConfig {
    /// Pause inserted between successive queue items during load, fill, and
    /// export. Zero means a bare cooperative yield; the point is to keep the
    /// host responsive between documents, not to enforce wall-clock spacing.
    pub inter_item_delay: Duration,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            inter_item_delay: Duration::ZERO,
        }
    }
}

/// A file handed to the load stage, in upload order.
#[derive(Clone, Debug)]
pub struct IncomingFile {
    pub bytes: Vec<u8>,
    pub media_type: String,
    pub display_name: String,
}

/// Per-file result of the load stage.
#[derive(Debug)]
pub struct LoadOutcome {
    pub display_name: String,
    /// The queued identity on success.
    pub result: Result<u64, LoadError>,
}

/// Per-document result of the fill stage.
#[derive(Debug)]
pub struct FillReport {
    pub identity: u64,
    pub result: Result<FillOutcome, PipelineError>,
}

/// Per-document result of the export stage.
#[derive(Debug)]
pub struct ExportReport {
    pub identity: u64,
    pub filename: String,
    pub result: Result<(), SerializeError>,
}

/// Applies load, fill, and export across a [`BatchQueue`] one document at a
/// time, yielding between items so a large batch never blocks other work.
///
/// Within every stage, documents are processed in registration order. Each
/// stage snapshots the identity list before iterating and resolves each
/// identity by lookup, so an entry removed while the traversal is suspended
/// at a yield point is skipped without disturbing the rest of the queue.
pub struct BatchSequencer<L, S, E> {
    queue: BatchQueue,
    loader: Arc<L>,
    serializer: Arc<S>,
    sink: Arc<E>,
    config: SequencerConfig,
}

impl<L, S, E> BatchSequencer<L, S, E>
where
    L: DocumentLoader,
    S: DocumentSerializer,
    E: ExportSink,
{
    pub fn new(loader: Arc<L>, serializer: Arc<S>, sink: Arc<E>) -> Self {
        Self::with_config(loader, serializer, sink, SequencerConfig::default())
    }

    pub fn with_config(
        loader: Arc<L>,
        serializer: Arc<S>,
        sink: Arc<E>,
        config: SequencerConfig,
    ) -> Self {
        Self {
            queue: BatchQueue::new(),
            loader,
            serializer,
            sink,
            config,
        }
    }

    pub fn queue(&self) -> &BatchQueue {
        &self.queue
    }

    /// Load stage: parse each file in upload order and append it to the
    /// queue. A file that fails to parse is reported and skipped; the rest of
    /// the batch still loads.
    pub async fn load_files(&self, files: Vec<IncomingFile>) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            let result = match self.loader.load(&file.bytes).await {
                Ok(document) => Ok(self
                    .queue
                    .push(document, file.media_type, file.display_name.clone())
                    .await),
                Err(e) => {
                    log::warn!("failed to load {}: {e}", file.display_name);
                    Err(e)
                }
            };
            outcomes.push(LoadOutcome {
                display_name: file.display_name,
                result,
            });
            self.pause().await;
        }
        log::debug!("load stage finished: {} file(s)", outcomes.len());
        outcomes
    }

    /// Fill stage: apply the match table to every queued document against the
    /// same sheet index. A document whose sheet index is out of range is
    /// reported and skipped; the queue proceeds.
    pub async fn fill_all(
        &self,
        table: &MatchTable,
        sheet_index: usize,
        key_col: ColRef,
        fill_col: ColRef,
    ) -> Vec<FillReport> {
        let mut reports = Vec::new();
        for identity in self.queue.identities().await {
            let result = self
                .queue
                .with_document_mut(identity, |document| match document.sheet_mut(sheet_index) {
                    Some(sheet) => Ok(fill(sheet, table, key_col, fill_col)),
                    None => Err(PipelineError::SheetOutOfRange { index: sheet_index }),
                })
                .await;
            let Some(result) = result else {
                // Removed while we were suspended between items.
                continue;
            };
            if let Err(e) = &result {
                log::warn!("fill skipped for queue entry {identity}: {e}");
            }
            reports.push(FillReport { identity, result });
            self.pause().await;
        }
        log::debug!("fill stage finished: {} document(s)", reports.len());
        reports
    }

    /// Export stage: serialize each document and deliver it with a filename
    /// derived from its original name. Serialization failures are isolated
    /// per document.
    pub async fn export_all(&self) -> Vec<ExportReport> {
        let mut reports = Vec::new();
        for identity in self.queue.identities().await {
            let Some(entry) = self.queue.entry_cloned(identity).await else {
                continue;
            };
            let filename = format!("{EXPORT_PREFIX}{}", entry.display_name);
            let result = match self.serializer.serialize(&entry.document).await {
                Ok(bytes) => {
                    // The entry may have been retracted while serializing.
                    if self.queue.contains(identity).await {
                        self.sink.deliver(bytes, &entry.media_type, &filename);
                    }
                    Ok(())
                }
                Err(e) => {
                    log::warn!("export failed for {}: {e}", entry.display_name);
                    Err(e)
                }
            };
            reports.push(ExportReport {
                identity,
                filename,
                result,
            });
            self.pause().await;
        }
        log::debug!("export stage finished: {} document(s)", reports.len());
        reports
    }

    async fn pause(&self) {
        if self.config.inter_item_delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.config.inter_item_delay).await;
        }
    }
}
