use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use dashboard_types::{DashboardError, Document};

/// Where the whole document physically lives.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    async fn read(&self) -> Result<Document, DashboardError>;

    /// Replaces the stored document. Either the whole document lands or the call fails.
    async fn write(&self, document: &Document) -> Result<(), DashboardError>;

    fn describe(&self) -> String;
}

/// A single pretty-printed JSON file.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }
}

#[async_trait]
impl DocumentBackend for JsonFileBackend {
    async fn read(&self) -> Result<Document, DashboardError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(DashboardError::storage)?;

        match serde_json::from_str(&raw) {
            Ok(document) => Ok(document),
            Err(err) => {
                // Keep the unreadable file around; the caller may replace it with a default.
                let corrupt = self.sibling(".corrupt");
                tracing::error!(
                    "Document at {} is not valid JSON ({}), copying it to {}",
                    self.path.display(),
                    err,
                    corrupt.display()
                );
                if let Err(copy_err) = tokio::fs::copy(&self.path, &corrupt).await {
                    tracing::error!("Failed to preserve corrupt document: {}", copy_err);
                }
                Err(DashboardError::storage(err))
            }
        }
    }

    async fn write(&self, document: &Document) -> Result<(), DashboardError> {
        let json = serde_json::to_string_pretty(document).map_err(DashboardError::storage)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(DashboardError::storage)?;
        }

        let staging = self.sibling(".tmp");
        tokio::fs::write(&staging, json)
            .await
            .map_err(DashboardError::storage)?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(DashboardError::storage)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// In-process backend for tests. Starts empty, so the first read fails
/// the same way a missing file does.
#[derive(Default)]
pub struct MemoryBackend {
    document: RwLock<Option<Document>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document: RwLock::new(Some(document)),
            ..Self::default()
        }
    }

    pub async fn snapshot(&self) -> Option<Document> {
        self.document.read().await.clone()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn read(&self) -> Result<Document, DashboardError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DashboardError::storage("memory backend read failure"));
        }
        self.document
            .read()
            .await
            .clone()
            .ok_or_else(|| DashboardError::storage("no document stored"))
    }

    async fn write(&self, document: &Document) -> Result<(), DashboardError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DashboardError::storage("memory backend write failure"));
        }
        *self.document.write().await = Some(document.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
