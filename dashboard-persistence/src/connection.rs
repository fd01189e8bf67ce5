use std::path::PathBuf;
use std::sync::Arc;

use crate::backend::{JsonFileBackend, MemoryBackend};
use crate::store::{AdminSeed, DocumentStore};
use dashboard_types::DashboardError;

pub async fn connect_to_document_file(
    path: impl Into<PathBuf>,
    seed: AdminSeed,
) -> Result<DocumentStore, DashboardError> {
    DocumentStore::open(Arc::new(JsonFileBackend::new(path)), seed).await
}

pub async fn connect_to_memory_store() -> Result<DocumentStore, DashboardError> {
    DocumentStore::open(Arc::new(MemoryBackend::new()), AdminSeed::default()).await
}
