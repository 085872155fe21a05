use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workflows::careers::applications::domain::{
    CareerApplicationRecord, DraftField, JobReference, SelectedFile,
};
use crate::workflows::careers::applications::store::{
    ListingCatalog, ObjectStore, RecordStore, StoreError,
};
use crate::workflows::careers::applications::uploader::Clock;
use crate::workflows::careers::applications::{
    careers_router, CareersService, SubmissionCoordinator, WizardState,
};
use crate::workflows::careers::backend::InMemoryBackend;
use crate::workflows::careers::listings::JobListing;

pub(super) const MIB: usize = 1024 * 1024;
pub(super) const PDF: &str = "application/pdf";
pub(super) const FIXED_MILLIS: i64 = 1_735_689_600_000;

pub(super) struct FixedClock(pub(super) i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

pub(super) fn pdf(name: &str, size: usize) -> SelectedFile {
    SelectedFile::new(name, PDF, vec![b'%'; size])
}

pub(super) fn fill_identity(wizard: &mut WizardState) {
    wizard
        .update_field(DraftField::FirstName, "John")
        .expect("first name");
    wizard
        .update_field(DraftField::LastName, "Smith")
        .expect("last name");
    wizard
        .update_field(DraftField::Email, "john@x.com")
        .expect("email");
    wizard.update_field(DraftField::Phone, "+1").expect("phone");
}

pub(super) fn job() -> JobReference {
    JobReference {
        id: "job-front-desk".to_string(),
        title: "Front Desk Agent".to_string(),
    }
}

pub(super) fn listings() -> Vec<JobListing> {
    vec![
        JobListing {
            id: "job-front-desk".to_string(),
            title: "Front Desk Agent".to_string(),
            department: "Front Office".to_string(),
            location: "Diamond - Marmaris".to_string(),
            employment_type: "Full-time".to_string(),
            description: Some("Welcome guests and manage arrivals.".to_string()),
            requirements: vec!["English".to_string(), "Opera PMS".to_string()],
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
            is_active: true,
        },
        JobListing {
            id: "job-spa".to_string(),
            title: "Spa Therapist".to_string(),
            department: "Wellness".to_string(),
            location: "Sarıgerme".to_string(),
            employment_type: "Seasonal".to_string(),
            description: None,
            requirements: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap(),
            is_active: true,
        },
        JobListing {
            id: "job-closed".to_string(),
            title: "Animator".to_string(),
            department: "Entertainment".to_string(),
            location: "Sarıgerme".to_string(),
            employment_type: "Seasonal".to_string(),
            description: None,
            requirements: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap(),
            is_active: false,
        },
    ]
}

/// Object store that records every `put` and fails paths containing `fail_on`.
#[derive(Default)]
pub(super) struct ScriptedObjects {
    pub(super) paths: Mutex<Vec<String>>,
    fail_on: Option<&'static str>,
}

impl ScriptedObjects {
    pub(super) fn failing_on(fragment: &'static str) -> Self {
        Self {
            paths: Mutex::new(Vec::new()),
            fail_on: Some(fragment),
        }
    }

    pub(super) fn paths(&self) -> Vec<String> {
        self.paths.lock().expect("paths mutex poisoned").clone()
    }
}

#[async_trait]
impl ObjectStore for ScriptedObjects {
    async fn put(&self, path: &str, _content_type: &str, _bytes: &[u8]) -> Result<(), StoreError> {
        self.paths
            .lock()
            .expect("paths mutex poisoned")
            .push(path.to_string());
        match self.fail_on {
            Some(fragment) if path.contains(fragment) => {
                Err(StoreError::Transport("connection reset".to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// Record store that captures inserts, optionally rejecting all of them.
#[derive(Default)]
pub(super) struct ScriptedRecords {
    records: Mutex<Vec<CareerApplicationRecord>>,
    reject: bool,
}

impl ScriptedRecords {
    pub(super) fn rejecting() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            reject: true,
        }
    }

    pub(super) fn records(&self) -> Vec<CareerApplicationRecord> {
        self.records.lock().expect("records mutex poisoned").clone()
    }
}

#[async_trait]
impl RecordStore for ScriptedRecords {
    async fn insert_application(&self, record: &CareerApplicationRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("records mutex poisoned")
            .push(record.clone());
        if self.reject {
            Err(StoreError::Rejected {
                status: 400,
                message: "violates check constraint".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

pub(super) struct UnavailableCatalog;

#[async_trait]
impl ListingCatalog for UnavailableCatalog {
    async fn active_listings(&self) -> Result<Vec<JobListing>, StoreError> {
        Err(StoreError::Transport("database offline".to_string()))
    }
}

pub(super) fn coordinator(
    objects: Arc<ScriptedObjects>,
    records: Arc<ScriptedRecords>,
) -> SubmissionCoordinator {
    SubmissionCoordinator::with_clock(objects, records, Arc::new(FixedClock(FIXED_MILLIS)))
}

pub(super) fn in_memory_service() -> (Arc<CareersService>, InMemoryBackend) {
    let backend = InMemoryBackend::with_listings(listings());
    let store = Arc::new(backend.clone());
    let coordinator = SubmissionCoordinator::with_clock(
        store.clone(),
        store.clone(),
        Arc::new(FixedClock(FIXED_MILLIS)),
    );
    (Arc::new(CareersService::new(store, coordinator)), backend)
}

pub(super) fn router_with_backend() -> (axum::Router, InMemoryBackend) {
    let (service, backend) = in_memory_service();
    (careers_router(service), backend)
}

pub(super) const BOUNDARY: &str = "careers-form-boundary";

/// Hand-built multipart body: text fields first, then `(field, file name, mime, bytes)` parts.
pub(super) fn multipart_body(
    fields: &[(&str, &str)],
    files: &[(&str, &str, &str, Vec<u8>)],
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, file_name, mime, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub(super) fn multipart_request(body: Vec<u8>) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post("/api/v1/careers/applications")
        .header(
            axum::http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(axum::body::Body::from(body))
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
