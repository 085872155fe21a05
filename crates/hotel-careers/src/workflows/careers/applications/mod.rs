//! Career application wizard, document uploads, and the submission pipeline.

pub mod domain;
pub mod review;
pub mod router;
pub mod service;
pub mod store;
pub mod submission;
pub mod uploader;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationDraft, CareerApplicationRecord, DocumentKind, DraftField, ExperienceBucket,
    JobReference, SelectedFile, StorageRef,
};
pub use review::{ReviewEntry, ReviewSection};
pub use router::careers_router;
pub use service::{CareersService, CareersServiceError, ListingPage};
pub use store::{ListingCatalog, ObjectStore, RecordStore, StoreError};
pub use submission::{
    SubmissionCoordinator, SubmissionError, SubmissionReceipt, GENERIC_FAILURE_MESSAGE,
    SUCCESS_MESSAGE,
};
pub use uploader::{Clock, DocumentUploader, SystemClock, UploadError};
pub use validation::{FileAcceptance, StepValidator, ValidationError, MAX_DOCUMENT_BYTES};
pub use wizard::{WizardPhase, WizardState, WizardStep};
