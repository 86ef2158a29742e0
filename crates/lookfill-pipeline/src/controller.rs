use std::sync::Arc;

use serde::Serialize;

use lookfill_engine::{column, header, HeaderEntry, MatchTable};
use lookfill_model::ColRef;

use crate::error::PipelineError;
use crate::io::{DocumentLoader, DocumentSerializer, ExportSink};
use crate::sequencer::{
    BatchSequencer, ExportReport, FillReport, IncomingFile, LoadOutcome, SequencerConfig,
};

/// Which panel an event addresses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PanelId {
    /// The panel holding the reference document (key→value mapping).
    Reference,
    /// The panel holding the documents to be filled.
    Target,
}

/// Selection progress of one panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelStage {
    Empty,
    SheetSelected,
    KeySelected,
    FullySelected,
}

/// One sheet-selection option.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SheetOption {
    pub label: String,
    pub index: usize,
}

/// Derived view state a UI renders for one panel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PanelView {
    pub stage: PanelStage,
    pub sheet_options: Vec<SheetOption>,
    pub header_options: Vec<HeaderEntry>,
    pub is_ready: bool,
}

#[derive(Debug, Default)]
struct PanelState {
    active_sheet: Option<usize>,
    key_col: Option<ColRef>,
    fill_col: Option<ColRef>,
    sheet_options: Vec<SheetOption>,
    header_options: Vec<HeaderEntry>,
}

impl PanelState {
    fn stage(&self, has_documents: bool) -> PanelStage {
        if !has_documents || self.active_sheet.is_none() {
            return PanelStage::Empty;
        }
        match (self.key_col, self.fill_col) {
            (Some(_), Some(_)) => PanelStage::FullySelected,
            (None, None) => PanelStage::SheetSelected,
            _ => PanelStage::KeySelected,
        }
    }

    fn reset(&mut self) {
        *self = PanelState::default();
    }
}

/// Owns the selection state machines of both panels and re-triggers the match
/// table build and fill stage as selections change.
///
/// Each panel's queue is exclusively its own; the published match table
/// ([`Arc`]-swapped, so a fill always observes one consistent snapshot) is
/// the only state shared between panels. Both panels use the same two column
/// selections: on the reference panel the "fill" column is the *value* column
/// the match table is built from.
pub struct PipelineController<L, S, E> {
    reference: BatchSequencer<L, S, E>,
    target: BatchSequencer<L, S, E>,
    reference_panel: PanelState,
    target_panel: PanelState,
    match_table: Option<Arc<MatchTable>>,
    ready_for_export: bool,
    last_fill: Vec<FillReport>,
}

impl<L, S, E> PipelineController<L, S, E>
where
    L: DocumentLoader,
    S: DocumentSerializer,
    E: ExportSink,
{
    pub fn new(loader: L, serializer: S, sink: E) -> Self {
        Self::with_config(loader, serializer, sink, SequencerConfig::default())
    }

    pub fn with_config(loader: L, serializer: S, sink: E, config: SequencerConfig) -> Self {
        let loader = Arc::new(loader);
        let serializer = Arc::new(serializer);
        let sink = Arc::new(sink);
        Self {
            reference: BatchSequencer::with_config(
                loader.clone(),
                serializer.clone(),
                sink.clone(),
                config.clone(),
            ),
            target: BatchSequencer::with_config(loader, serializer, sink, config),
            reference_panel: PanelState::default(),
            target_panel: PanelState::default(),
            match_table: None,
            ready_for_export: false,
            last_fill: Vec::new(),
        }
    }

    /// Load files into a panel's queue, in upload order.
    ///
    /// After the queue is populated, the sheet selection defaults to index 0
    /// unless the operator already chose one, and sheet/header options derive
    /// from the first queued document. If the panel was already fully
    /// selected, its recompute is re-triggered; a rejection at that point
    /// (e.g. no match table yet) is logged rather than returned, since the
    /// load itself succeeded.
    pub async fn add_files(&mut self, panel: PanelId, files: Vec<IncomingFile>) -> Vec<LoadOutcome> {
        let outcomes = self.sequencer(panel).load_files(files).await;
        if !self.sequencer(panel).queue().is_empty().await {
            self.panel_mut(panel).active_sheet.get_or_insert(0);
            self.recompute_options(panel).await;
            if let Err(e) = self.recompute(panel).await {
                log::warn!("recompute after load rejected: {e}");
            }
        }
        outcomes
    }

    /// Choose the active sheet index for a panel.
    pub async fn choose_sheet(&mut self, panel: PanelId, index: usize) -> Result<(), PipelineError> {
        self.panel_mut(panel).active_sheet = Some(index);
        self.recompute_options(panel).await;
        self.recompute(panel).await
    }

    /// Choose the key (match) column for a panel.
    pub async fn choose_key_column(
        &mut self,
        panel: PanelId,
        col: ColRef,
    ) -> Result<(), PipelineError> {
        self.panel_mut(panel).key_col = Some(col);
        self.recompute(panel).await
    }

    /// Choose the fill column (reference panel: the value column).
    pub async fn choose_fill_column(
        &mut self,
        panel: PanelId,
        col: ColRef,
    ) -> Result<(), PipelineError> {
        self.panel_mut(panel).fill_col = Some(col);
        self.recompute(panel).await
    }

    /// Remove one queued file. An emptied queue resets the panel to `Empty`
    /// and clears its derived state.
    pub async fn remove_file(&mut self, panel: PanelId, identity: u64) -> bool {
        let removed = self.sequencer(panel).queue().remove(identity).await;
        if !removed {
            return false;
        }
        if self.sequencer(panel).queue().is_empty().await {
            self.reset_panel(panel).await;
        } else {
            self.recompute_options(panel).await;
            if let Err(e) = self.recompute(panel).await {
                log::warn!("recompute after removal rejected: {e}");
            }
        }
        true
    }

    /// Explicitly clear a panel: queue, selections, and derived state.
    pub async fn reset_panel(&mut self, panel: PanelId) {
        self.sequencer(panel).queue().clear().await;
        self.panel_mut(panel).reset();
        match panel {
            PanelId::Reference => self.match_table = None,
            PanelId::Target => {
                self.ready_for_export = false;
                self.last_fill.clear();
            }
        }
    }

    /// Re-run the fill stage on operator request.
    pub async fn run_fill(&mut self) -> Result<(), PipelineError> {
        let has_documents = !self.target.queue().is_empty().await;
        if self.target_panel.stage(has_documents) != PanelStage::FullySelected {
            return Err(PipelineError::SelectionIncomplete);
        }
        self.recompute(PanelId::Target).await
    }

    /// Export stage entry point, gated on [`PipelineController::is_ready`].
    pub async fn confirm_export(&mut self) -> Result<Vec<ExportReport>, PipelineError> {
        if !self.is_ready().await {
            return Err(PipelineError::NotReady);
        }
        Ok(self.target.export_all().await)
    }

    /// True once the batch has been filled and is awaiting export.
    pub async fn is_ready(&self) -> bool {
        self.ready_for_export && !self.target.queue().is_empty().await
    }

    /// The derived view state for one panel.
    pub async fn view(&self, panel: PanelId) -> PanelView {
        let has_documents = !self.sequencer(panel).queue().is_empty().await;
        let state = self.panel(panel);
        PanelView {
            stage: state.stage(has_documents),
            sheet_options: state.sheet_options.clone(),
            header_options: state.header_options.clone(),
            is_ready: self.is_ready().await,
        }
    }

    /// The currently published match table, if any.
    pub fn match_table(&self) -> Option<Arc<MatchTable>> {
        self.match_table.clone()
    }

    /// Per-document reports from the most recent fill run.
    pub fn last_fill(&self) -> &[FillReport] {
        &self.last_fill
    }

    /// The target panel's queue (for identity-based removal and inspection).
    pub fn target_queue(&self) -> &crate::queue::BatchQueue {
        self.target.queue()
    }

    /// The reference panel's queue.
    pub fn reference_queue(&self) -> &crate::queue::BatchQueue {
        self.reference.queue()
    }

    fn sequencer(&self, panel: PanelId) -> &BatchSequencer<L, S, E> {
        match panel {
            PanelId::Reference => &self.reference,
            PanelId::Target => &self.target,
        }
    }

    fn panel(&self, panel: PanelId) -> &PanelState {
        match panel {
            PanelId::Reference => &self.reference_panel,
            PanelId::Target => &self.target_panel,
        }
    }

    fn panel_mut(&mut self, panel: PanelId) -> &mut PanelState {
        match panel {
            PanelId::Reference => &mut self.reference_panel,
            PanelId::Target => &mut self.target_panel,
        }
    }

    /// Rebuild sheet and header options from the panel's first document.
    async fn recompute_options(&mut self, panel: PanelId) {
        let active_sheet = self.panel(panel).active_sheet.unwrap_or(0);
        let options = self
            .sequencer(panel)
            .queue()
            .with_first(|doc| {
                let sheet_options = doc
                    .sheet_names()
                    .into_iter()
                    .enumerate()
                    .map(|(index, label)| SheetOption { label, index })
                    .collect();
                let header_options = doc
                    .sheet(active_sheet)
                    .map(header)
                    .unwrap_or_default();
                (sheet_options, header_options)
            })
            .await;
        let state = self.panel_mut(panel);
        match options {
            Some((sheets, headers)) => {
                state.sheet_options = sheets;
                state.header_options = headers;
            }
            None => {
                state.sheet_options.clear();
                state.header_options.clear();
            }
        }
    }

    /// The pure recompute invoked on every transition into `FullySelected`.
    /// Repeating the same selection recomputes the same result.
    async fn recompute(&mut self, panel: PanelId) -> Result<(), PipelineError> {
        match panel {
            PanelId::Reference => self.recompute_reference().await,
            PanelId::Target => self.recompute_target().await,
        }
    }

    async fn recompute_reference(&mut self) -> Result<(), PipelineError> {
        // Any selection change invalidates the previously published table
        // until the rebuild below completes.
        self.match_table = None;

        let has_documents = !self.reference.queue().is_empty().await;
        if self.reference_panel.stage(has_documents) != PanelStage::FullySelected {
            return Ok(());
        }
        let (Some(sheet_index), Some(key_col), Some(value_col)) = (
            self.reference_panel.active_sheet,
            self.reference_panel.key_col,
            self.reference_panel.fill_col,
        ) else {
            return Ok(());
        };

        let built = self
            .reference
            .queue()
            .with_first(|doc| {
                doc.sheet(sheet_index).map(|sheet| {
                    MatchTable::build(&column(sheet, key_col), &column(sheet, value_col))
                })
            })
            .await;
        match built {
            Some(Some(table)) => {
                self.match_table = Some(Arc::new(table));
                Ok(())
            }
            Some(None) => Err(PipelineError::SheetOutOfRange { index: sheet_index }),
            None => Ok(()),
        }
    }

    async fn recompute_target(&mut self) -> Result<(), PipelineError> {
        self.ready_for_export = false;
        self.last_fill.clear();

        let has_documents = !self.target.queue().is_empty().await;
        if self.target_panel.stage(has_documents) != PanelStage::FullySelected {
            return Ok(());
        }
        let (Some(sheet_index), Some(key_col), Some(fill_col)) = (
            self.target_panel.active_sheet,
            self.target_panel.key_col,
            self.target_panel.fill_col,
        ) else {
            return Ok(());
        };

        // The fill is gated on a published, non-empty match table; without
        // one the attempt is rejected and nothing is mutated.
        let table = match &self.match_table {
            Some(table) if !table.is_empty() => table.clone(),
            _ => return Err(PipelineError::MatchTableMissing),
        };

        self.last_fill = self
            .target
            .fill_all(&table, sheet_index, key_col, fill_col)
            .await;
        self.ready_for_export = true;
        Ok(())
    }
}
