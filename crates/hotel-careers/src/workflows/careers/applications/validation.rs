use mime::Mime;

use super::domain::{ApplicationDraft, DocumentKind, DraftField, SelectedFile};
use super::wizard::WizardStep;

/// Largest document accepted for upload (10 MiB, inclusive).
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MSWORD_MIME: &str = "application/msword";

/// Client-side validation failures. None of these ever reach the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    MissingField(DraftField),
    #[error("a CV is required to continue")]
    MissingCv,
    #[error("{} must be a PDF or Word document (got '{mime_type}')", .kind.label())]
    UnsupportedFileType { kind: DocumentKind, mime_type: String },
    #[error("{} is {size} bytes; the limit is {limit} bytes", .kind.label())]
    FileTooLarge {
        kind: DocumentKind,
        size: u64,
        limit: u64,
    },
    #[error("'{value}' is not a valid date for {}", .field.label())]
    InvalidDate { field: DraftField, value: String },
    #[error("'{0}' is not a recognised experience range")]
    UnknownExperienceBucket(String),
    #[error("unknown application field '{0}'")]
    UnknownField(String),
    #[error("this application has already been submitted")]
    SessionClosed,
}

/// Gatekeeper for forward navigation through the wizard.
pub struct StepValidator;

impl StepValidator {
    pub fn is_valid(step: WizardStep, draft: &ApplicationDraft) -> bool {
        Self::check(step, draft).is_ok()
    }

    /// Like [`StepValidator::is_valid`] but names the first thing blocking the step.
    pub fn check(step: WizardStep, draft: &ApplicationDraft) -> Result<(), ValidationError> {
        match step {
            WizardStep::Identity => check_identity(draft),
            WizardStep::Experience => Ok(()),
            WizardStep::Documents => check_documents(draft),
            WizardStep::Review => Ok(()),
        }
    }

    /// Gate applied by the submit button, independent of the current step.
    pub fn ready_for_submission(draft: &ApplicationDraft) -> Result<(), ValidationError> {
        check_identity(draft)?;
        check_documents(draft)
    }
}

fn check_identity(draft: &ApplicationDraft) -> Result<(), ValidationError> {
    for field in DraftField::IDENTITY {
        let blank = draft
            .text(field)
            .map_or(true, |value| value.trim().is_empty());
        if blank {
            return Err(ValidationError::MissingField(field));
        }
    }
    Ok(())
}

fn check_documents(draft: &ApplicationDraft) -> Result<(), ValidationError> {
    if draft.cv_file.is_some() {
        Ok(())
    } else {
        Err(ValidationError::MissingCv)
    }
}

/// Type and size rules a file must pass before it can be attached to a draft.
pub struct FileAcceptance;

impl FileAcceptance {
    pub const ACCEPTED_TYPES: [&'static str; 3] = ["application/pdf", MSWORD_MIME, DOCX_MIME];

    pub fn check(kind: DocumentKind, file: &SelectedFile) -> Result<(), ValidationError> {
        if !Self::is_accepted_type(&file.mime_type) {
            return Err(ValidationError::UnsupportedFileType {
                kind,
                mime_type: file.mime_type.clone(),
            });
        }

        let size = file.size();
        if size > MAX_DOCUMENT_BYTES {
            return Err(ValidationError::FileTooLarge {
                kind,
                size,
                limit: MAX_DOCUMENT_BYTES,
            });
        }

        Ok(())
    }

    pub fn is_accepted_type(raw: &str) -> bool {
        raw.trim()
            .parse::<Mime>()
            .map(|mime| {
                let essence = mime.essence_str().to_ascii_lowercase();
                Self::ACCEPTED_TYPES.contains(&essence.as_str())
            })
            .unwrap_or(false)
    }
}
