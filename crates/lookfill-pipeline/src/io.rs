use lookfill_model::Document;

use crate::error::{LoadError, SerializeError};

/// Parses raw bytes into a [`Document`].
///
/// Implementations own the tabular format; the pipeline only sees the
/// in-memory model.
#[allow(async_fn_in_trait)]
pub trait DocumentLoader {
    async fn load(&self, bytes: &[u8]) -> Result<Document, LoadError>;
}

/// Serializes a [`Document`] back to bytes for export.
#[allow(async_fn_in_trait)]
pub trait DocumentSerializer {
    async fn serialize(&self, document: &Document) -> Result<Vec<u8>, SerializeError>;
}

/// Receives exported bytes. Fire-and-forget: the pipeline consumes no return
/// value and never retries a delivery.
pub trait ExportSink {
    fn deliver(&self, bytes: Vec<u8>, media_type: &str, filename: &str);
}

impl<T: ExportSink + ?Sized> ExportSink for std::sync::Arc<T> {
    fn deliver(&self, bytes: Vec<u8>, media_type: &str, filename: &str) {
        (**self).deliver(bytes, media_type, filename)
    }
}
