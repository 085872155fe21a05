use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::domain::{
    ApplicationDraft, DocumentKind, DraftField, ExperienceBucket, JobReference, SelectedFile,
};
use super::review::{review_sections, ReviewSection};
use super::submission::{SubmissionCoordinator, SubmissionError, SubmissionReceipt};
use super::validation::{FileAcceptance, StepValidator, ValidationError};

/// Ordered steps of the application wizard, numbered 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Identity = 1,
    Experience = 2,
    Documents = 3,
    Review = 4,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Identity,
        WizardStep::Experience,
        WizardStep::Documents,
        WizardStep::Review,
    ];

    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Step for a 1-based index, clamped into the valid range.
    pub fn clamped(index: i32) -> Self {
        match index {
            i32::MIN..=1 => WizardStep::Identity,
            2 => WizardStep::Experience,
            3 => WizardStep::Documents,
            _ => WizardStep::Review,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            WizardStep::Identity => "Personal Information",
            WizardStep::Experience => "Experience",
            WizardStep::Documents => "Documents",
            WizardStep::Review => "Review & Submit",
        }
    }

    fn next(self) -> Self {
        Self::clamped(i32::from(self.number()) + 1)
    }

    fn previous(self) -> Self {
        Self::clamped(i32::from(self.number()) - 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardPhase {
    Editing,
    Submitted,
}

/// Single-session state machine collecting an application across four steps.
#[derive(Debug, Clone)]
pub struct WizardState {
    draft: ApplicationDraft,
    step: WizardStep,
    phase: WizardPhase,
    job: Option<JobReference>,
}

impl WizardState {
    /// Opens a fresh wizard; `job` is `None` for a general application.
    pub fn open(job: Option<JobReference>) -> Self {
        Self {
            draft: ApplicationDraft::default(),
            step: WizardStep::Identity,
            phase: WizardPhase::Editing,
            job,
        }
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn job(&self) -> Option<&JobReference> {
        self.job.as_ref()
    }

    /// Heading for the wizard dialog.
    pub fn heading(&self) -> &str {
        self.job
            .as_ref()
            .map_or("Career Application", |job| job.title.as_str())
    }

    /// Summary shown on the review step, with fallbacks for blank answers.
    pub fn review(&self) -> Vec<ReviewSection> {
        review_sections(&self.draft)
    }

    pub fn can_advance(&self) -> bool {
        self.step != WizardStep::Review && StepValidator::is_valid(self.step, &self.draft)
    }

    /// Sets exactly one field. Empty input clears optional fields.
    pub fn update_field(&mut self, field: DraftField, value: &str) -> Result<(), ValidationError> {
        self.ensure_editing()?;

        match field {
            DraftField::DateOfBirth => self.draft.date_of_birth = parse_date(field, value)?,
            DraftField::AvailableStartDate => {
                self.draft.available_start_date = parse_date(field, value)?
            }
            DraftField::YearsExperience => {
                self.draft.years_experience = parse_experience(value)?
            }
            text_field => {
                if let Some(slot) = self.draft.text_slot(text_field) {
                    *slot = value.to_string();
                }
            }
        }

        Ok(())
    }

    /// Like [`WizardState::update_field`] but addresses the field by its form name.
    pub fn update_named_field(&mut self, name: &str, value: &str) -> Result<(), ValidationError> {
        let field = name
            .parse::<DraftField>()
            .map_err(|_| ValidationError::UnknownField(name.to_string()))?;
        self.update_field(field, value)
    }

    /// Attaches a document after it passes the acceptance rules. Rejected files
    /// leave the current attachment in place.
    pub fn attach(
        &mut self,
        kind: DocumentKind,
        file: SelectedFile,
    ) -> Result<(), ValidationError> {
        self.ensure_editing()?;
        FileAcceptance::check(kind, &file)?;
        debug!(kind = kind.slug(), size = file.size(), "document attached to draft");
        *self.draft.document_slot(kind) = Some(file);
        Ok(())
    }

    pub fn detach(&mut self, kind: DocumentKind) -> Result<Option<SelectedFile>, ValidationError> {
        self.ensure_editing()?;
        Ok(self.draft.document_slot(kind).take())
    }

    /// Moves forward one step when the current step validates; otherwise a no-op.
    pub fn advance(&mut self) -> bool {
        if self.phase != WizardPhase::Editing || !self.can_advance() {
            return false;
        }
        self.step = self.step.next();
        true
    }

    /// Moves back one step, never past the first.
    pub fn retreat(&mut self) -> bool {
        if self.phase != WizardPhase::Editing || self.step == WizardStep::Identity {
            return false;
        }
        self.step = self.step.previous();
        true
    }

    /// Jumps back to an earlier step (e.g. an "edit" link on the review page).
    /// Forward jumps are ignored; use [`WizardState::advance`] for those.
    pub fn go_to(&mut self, step: WizardStep) -> bool {
        if self.phase != WizardPhase::Editing || step >= self.step {
            return false;
        }
        self.step = step;
        true
    }

    /// Advances until the review step, reporting the first step that blocks.
    pub fn advance_to_review(&mut self) -> Result<(), ValidationError> {
        self.ensure_editing()?;
        while self.step != WizardStep::Review {
            StepValidator::check(self.step, &self.draft)?;
            self.advance();
        }
        Ok(())
    }

    /// Re-checks the submission gate and hands the draft to the coordinator.
    ///
    /// On success the draft is discarded and the wizard becomes terminal. On
    /// failure the draft stays intact so the applicant can try again.
    pub async fn submit(
        &mut self,
        coordinator: &SubmissionCoordinator,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        self.ensure_editing()?;
        StepValidator::ready_for_submission(&self.draft)?;

        let receipt = coordinator.submit(&self.draft, self.job.as_ref()).await?;

        self.draft = ApplicationDraft::default();
        self.phase = WizardPhase::Submitted;
        Ok(receipt)
    }

    fn ensure_editing(&self) -> Result<(), ValidationError> {
        match self.phase {
            WizardPhase::Editing => Ok(()),
            WizardPhase::Submitted => Err(ValidationError::SessionClosed),
        }
    }
}

fn parse_date(field: DraftField, value: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

fn parse_experience(value: &str) -> Result<Option<ExperienceBucket>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u8>()
        .ok()
        .and_then(ExperienceBucket::from_years)
        .map(Some)
        .ok_or_else(|| ValidationError::UnknownExperienceBucket(value.to_string()))
}
