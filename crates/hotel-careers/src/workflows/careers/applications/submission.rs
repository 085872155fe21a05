use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{
    ApplicationDraft, CareerApplicationRecord, DocumentKind, JobReference, StorageRef,
};
use super::store::{ObjectStore, RecordStore, StoreError};
use super::uploader::{Clock, DocumentUploader, UploadError};
use super::validation::ValidationError;

/// Notification shown to applicants for any failed submission.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "There was an error submitting your application. Please try again.";

/// Notification shown once an application has been stored.
pub const SUCCESS_MESSAGE: &str =
    "Thank you for your interest in joining Green Nature Hotels. Our HR team will review your application and contact you within 5-7 business days.";

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub job_id: Option<String>,
    pub cv: Option<StorageRef>,
    pub cover_letter: Option<StorageRef>,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("application is incomplete: {0}")]
    Incomplete(#[from] ValidationError),
    #[error("CV upload failed: {source}")]
    CvUploadFailed {
        #[source]
        source: UploadError,
        orphaned: Vec<StorageRef>,
    },
    #[error("cover letter upload failed: {source}")]
    CoverLetterUploadFailed {
        #[source]
        source: UploadError,
        orphaned: Vec<StorageRef>,
    },
    #[error("failed to store application record: {source}")]
    PersistFailed {
        #[source]
        source: StoreError,
        orphaned: Vec<StorageRef>,
    },
}

impl SubmissionError {
    /// Documents that were stored before the failure and are now referenced by
    /// no record.
    pub fn orphaned(&self) -> &[StorageRef] {
        match self {
            SubmissionError::Incomplete(_) => &[],
            SubmissionError::CvUploadFailed { orphaned, .. }
            | SubmissionError::CoverLetterUploadFailed { orphaned, .. }
            | SubmissionError::PersistFailed { orphaned, .. } => orphaned,
        }
    }

    /// Applicant-facing text, identical for every failure kind
    /// that reached the network.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Incomplete(err) => err.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Uploads a draft's documents, then writes one composite record.
///
/// The three network calls run strictly in order because the record references
/// the storage paths produced by the uploads. Nothing is rolled back: documents
/// stored before a later failure stay orphaned and are reported on the error.
pub struct SubmissionCoordinator {
    uploader: DocumentUploader,
    records: Arc<dyn RecordStore>,
}

impl SubmissionCoordinator {
    pub fn new(objects: Arc<dyn ObjectStore>, records: Arc<dyn RecordStore>) -> Self {
        Self {
            uploader: DocumentUploader::new(objects),
            records,
        }
    }

    pub fn with_clock(
        objects: Arc<dyn ObjectStore>,
        records: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            uploader: DocumentUploader::with_clock(objects, clock),
            records,
        }
    }

    pub async fn submit(
        &self,
        draft: &ApplicationDraft,
        job: Option<&JobReference>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let mut uploaded = Vec::new();

        let cv = match &draft.cv_file {
            Some(file) => match self.uploader.upload(file, DocumentKind::Cv).await {
                Ok(reference) => {
                    uploaded.push(reference.clone());
                    Some(reference)
                }
                Err(source) => {
                    return Err(SubmissionError::CvUploadFailed {
                        source,
                        orphaned: uploaded,
                    })
                }
            },
            None => None,
        };

        let cover_letter = match &draft.cover_letter_file {
            Some(file) => match self.uploader.upload(file, DocumentKind::CoverLetter).await {
                Ok(reference) => {
                    uploaded.push(reference.clone());
                    Some(reference)
                }
                Err(source) => {
                    log_orphans(&uploaded);
                    return Err(SubmissionError::CoverLetterUploadFailed {
                        source,
                        orphaned: uploaded,
                    });
                }
            },
            None => None,
        };

        let record =
            CareerApplicationRecord::from_draft(draft, job, cv.as_ref(), cover_letter.as_ref());

        if let Err(source) = self.records.insert_application(&record).await {
            warn!(error = %source, "career application insert failed");
            log_orphans(&uploaded);
            return Err(SubmissionError::PersistFailed {
                source,
                orphaned: uploaded,
            });
        }

        info!(
            job_id = record.job_id.as_deref().unwrap_or("general"),
            documents = uploaded.len(),
            "career application submitted"
        );

        Ok(SubmissionReceipt {
            job_id: record.job_id,
            cv,
            cover_letter,
        })
    }
}

fn log_orphans(uploaded: &[StorageRef]) {
    for reference in uploaded {
        warn!(path = %reference, "uploaded document left without an application record");
    }
}
