use std::sync::Arc;

use tokio::sync::Mutex;

use lookfill_model::Document;

/// One target document registered with the batch sequencer.
#[derive(Clone, Debug)]
pub struct QueueEntry {
    /// Queue-assigned identity, used to remove the entry without disturbing
    /// the order of the rest.
    pub identity: u64,
    /// The loaded document. Owned by the queue for its lifetime.
    pub document: Document,
    /// Media type the document arrived with; passed through to export.
    pub media_type: String,
    /// Original file name; export filenames derive from it.
    pub display_name: String,
}

#[derive(Debug)]
struct QueueInner {
    entries: Vec<QueueEntry>,
    next_identity: u64,
}

/// The ordered set of documents undergoing fill/export in one run.
///
/// Entries stay in registration order through every stage; removal by
/// identity never reorders the survivors. The queue is a cheap cloneable
/// handle over shared state so a suspended stage traversal and a UI-driven
/// removal can coexist: stages snapshot the identity list up front and
/// re-resolve each identity per step, skipping entries removed in between.
#[derive(Clone, Debug)]
pub struct BatchQueue {
    inner: Arc<Mutex<QueueInner>>,
}

impl Default for BatchQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(QueueInner {
                entries: Vec::new(),
                next_identity: 1,
            })),
        }
    }

    /// Append a document, returning its assigned identity.
    pub async fn push(
        &self,
        document: Document,
        media_type: impl Into<String>,
        display_name: impl Into<String>,
    ) -> u64 {
        let mut inner = self.inner.lock().await;
        let identity = inner.next_identity;
        inner.next_identity += 1;
        inner.entries.push(QueueEntry {
            identity,
            document,
            media_type: media_type.into(),
            display_name: display_name.into(),
        });
        identity
    }

    /// Remove one entry by identity, keeping the remaining order intact.
    pub async fn remove(&self, identity: u64) -> bool {
        let mut inner = self.inner.lock().await;
        let Some(idx) = inner.entries.iter().position(|e| e.identity == identity) else {
            return false;
        };
        inner.entries.remove(idx);
        true
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.inner.lock().await.entries.clear();
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.entries.is_empty()
    }

    /// Identities in registration order, snapshotted for stage traversal.
    pub async fn identities(&self) -> Vec<u64> {
        self.inner.lock().await.entries.iter().map(|e| e.identity).collect()
    }

    /// Run `f` against one entry's document. Returns `None` if the identity
    /// has been removed since the caller snapshotted it.
    pub async fn with_document<R>(&self, identity: u64, f: impl FnOnce(&Document) -> R) -> Option<R> {
        let inner = self.inner.lock().await;
        inner
            .entries
            .iter()
            .find(|e| e.identity == identity)
            .map(|e| f(&e.document))
    }

    /// Mutable variant of [`BatchQueue::with_document`].
    pub async fn with_document_mut<R>(
        &self,
        identity: u64,
        f: impl FnOnce(&mut Document) -> R,
    ) -> Option<R> {
        let mut inner = self.inner.lock().await;
        inner
            .entries
            .iter_mut()
            .find(|e| e.identity == identity)
            .map(|e| f(&mut e.document))
    }

    /// Run `f` against the first queued document (sheet-selection options
    /// derive from it; batches are assumed structurally identical).
    pub async fn with_first<R>(&self, f: impl FnOnce(&Document) -> R) -> Option<R> {
        let inner = self.inner.lock().await;
        inner.entries.first().map(|e| f(&e.document))
    }

    /// Clone one entry out for export-stage serialization, so the queue lock
    /// is not held across the (async) serialize call.
    pub async fn entry_cloned(&self, identity: u64) -> Option<QueueEntry> {
        let inner = self.inner.lock().await;
        inner.entries.iter().find(|e| e.identity == identity).cloned()
    }

    /// True if the identity is still queued.
    pub async fn contains(&self, identity: u64) -> bool {
        let inner = self.inner.lock().await;
        inner.entries.iter().any(|e| e.identity == identity)
    }
}
