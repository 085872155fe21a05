use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::workflows::careers::applications::{
    CareerApplicationRecord, ListingCatalog, ObjectStore, RecordStore, StoreError,
};
use crate::workflows::careers::listings::{sort_newest_first, JobListing};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Process-local stand-in for the managed backend, used by the demo and when
/// no remote backend is configured.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBackend {
    objects: Arc<Mutex<BTreeMap<String, StoredObject>>>,
    applications: Arc<Mutex<Vec<CareerApplicationRecord>>>,
    listings: Arc<Mutex<Vec<JobListing>>>,
}

impl InMemoryBackend {
    pub fn with_listings(listings: Vec<JobListing>) -> Self {
        let backend = Self::default();
        *backend.listings.lock().expect("listings mutex poisoned") = listings;
        backend
    }

    pub fn objects(&self) -> BTreeMap<String, StoredObject> {
        self.objects.lock().expect("object mutex poisoned").clone()
    }

    pub fn applications(&self) -> Vec<CareerApplicationRecord> {
        self.applications
            .lock()
            .expect("application mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl ObjectStore for InMemoryBackend {
    async fn put(&self, path: &str, content_type: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let mut guard = self.objects.lock().expect("object mutex poisoned");
        if guard.contains_key(path) {
            return Err(StoreError::Rejected {
                status: 409,
                message: format!("object '{path}' already exists"),
            });
        }
        guard.insert(
            path.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                bytes: bytes.to_vec(),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryBackend {
    async fn insert_application(&self, record: &CareerApplicationRecord) -> Result<(), StoreError> {
        self.applications
            .lock()
            .expect("application mutex poisoned")
            .push(record.clone());
        Ok(())
    }
}

#[async_trait]
impl ListingCatalog for InMemoryBackend {
    async fn active_listings(&self) -> Result<Vec<JobListing>, StoreError> {
        let guard = self.listings.lock().expect("listings mutex poisoned");
        let mut active: Vec<JobListing> = guard
            .iter()
            .filter(|listing| listing.is_active)
            .cloned()
            .collect();
        sort_newest_first(&mut active);
        Ok(active)
    }
}
