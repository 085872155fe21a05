use async_trait::async_trait;

use super::domain::CareerApplicationRecord;
use crate::workflows::careers::listings::JobListing;

/// Blob storage for uploaded application documents.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under a caller-chosen `path`. Callers never reuse a path,
    /// so an existing object may be reported as a rejection.
    async fn put(&self, path: &str, content_type: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

/// Write side of the `career_applications` collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_application(&self, record: &CareerApplicationRecord) -> Result<(), StoreError>;
}

/// Read side of the `job_listings` collection.
#[async_trait]
pub trait ListingCatalog: Send + Sync {
    /// Listings flagged active, newest first.
    async fn active_listings(&self) -> Result<Vec<JobListing>, StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("store unreachable: {0}")]
    Transport(String),
    #[error("unexpected store response: {0}")]
    Decode(String),
}
