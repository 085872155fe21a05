use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use super::domain::{DocumentKind, SelectedFile, StorageRef};
use super::store::{ObjectStore, StoreError};
use super::validation::{DOCX_MIME, MSWORD_MIME};

/// Prefix under which every application document is stored.
pub const UPLOAD_PREFIX: &str = "applications";

/// Source of the millisecond timestamps embedded in storage paths.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to upload {} to '{path}': {source}", .kind.slug())]
pub struct UploadError {
    pub kind: DocumentKind,
    pub path: String,
    #[source]
    pub source: StoreError,
}

/// Turns a selected file into a stored object reference.
pub struct DocumentUploader {
    store: Arc<dyn ObjectStore>,
    clock: Arc<dyn Clock>,
    last_issued: AtomicI64,
}

impl DocumentUploader {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn ObjectStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            last_issued: AtomicI64::new(i64::MIN),
        }
    }

    /// Uploads one document. A failed upload is reported as-is; retrying is
    /// left to the caller.
    pub async fn upload(
        &self,
        file: &SelectedFile,
        kind: DocumentKind,
    ) -> Result<StorageRef, UploadError> {
        let path = self.storage_path(file, kind);
        debug!(%path, size = file.size(), "uploading application document");

        match self.store.put(&path, &file.mime_type, &file.content).await {
            Ok(()) => Ok(StorageRef(path)),
            Err(source) => {
                warn!(%path, error = %source, "application document upload failed");
                Err(UploadError { kind, path, source })
            }
        }
    }

    /// `applications/<millis>-<kind>.<ext>`; each call gets a strictly later
    /// timestamp than the previous one so paths never repeat.
    pub fn storage_path(&self, file: &SelectedFile, kind: DocumentKind) -> String {
        let stamp = self.next_timestamp();
        format!(
            "{UPLOAD_PREFIX}/{stamp}-{}.{}",
            kind.slug(),
            file_extension(file)
        )
    }

    fn next_timestamp(&self) -> i64 {
        let now = self.clock.now_millis();
        let previous = self
            .last_issued
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or(now);
        now.max(previous.saturating_add(1))
    }
}

fn file_extension(file: &SelectedFile) -> String {
    let from_name = file
        .name
        .rsplit_once('.')
        .map(|(_, ext)| ext.trim())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    if let Some(ext) = from_name {
        return ext.to_ascii_lowercase();
    }

    let essence = file
        .mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.as_str() {
        MSWORD_MIME => "doc".to_string(),
        DOCX_MIME => "docx".to_string(),
        _ => "pdf".to_string(),
    }
}
