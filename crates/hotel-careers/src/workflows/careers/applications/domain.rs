use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use crate::workflows::careers::listings::JobReference;

/// Opaque key returned by the object store for an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageRef(pub String);

impl StorageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two document slots an application can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Cv,
    CoverLetter,
}

impl DocumentKind {
    pub const fn slug(self) -> &'static str {
        match self {
            DocumentKind::Cv => "cv",
            DocumentKind::CoverLetter => "cover-letter",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DocumentKind::Cv => "CV / Resume",
            DocumentKind::CoverLetter => "Cover Letter",
        }
    }
}

/// A file picked by the applicant, held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Size in megabytes with two decimals, as shown next to an attached file.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size() as f64 / 1024.0 / 1024.0)
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size())
            .finish()
    }
}

/// Self-reported experience, captured as a bucket rather than a free number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceBucket {
    LessThanOneYear,
    OneToTwoYears,
    ThreeToFiveYears,
    SixToTenYears,
    MoreThanTenYears,
}

impl ExperienceBucket {
    pub const ALL: [ExperienceBucket; 5] = [
        ExperienceBucket::LessThanOneYear,
        ExperienceBucket::OneToTwoYears,
        ExperienceBucket::ThreeToFiveYears,
        ExperienceBucket::SixToTenYears,
        ExperienceBucket::MoreThanTenYears,
    ];

    /// Lower bound in years; this is what the record store persists.
    pub const fn years(self) -> u8 {
        match self {
            ExperienceBucket::LessThanOneYear => 0,
            ExperienceBucket::OneToTwoYears => 1,
            ExperienceBucket::ThreeToFiveYears => 3,
            ExperienceBucket::SixToTenYears => 6,
            ExperienceBucket::MoreThanTenYears => 11,
        }
    }

    pub fn from_years(years: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.years() == years)
    }
}

/// Every editable field of a draft, addressable by its form name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    FirstName,
    LastName,
    Email,
    Phone,
    Nationality,
    DateOfBirth,
    CurrentPosition,
    YearsExperience,
    PreviousEmployer,
    LinkedinUrl,
    AvailableStartDate,
    SalaryExpectation,
    AdditionalNotes,
}

impl DraftField {
    pub const ALL: [DraftField; 13] = [
        DraftField::FirstName,
        DraftField::LastName,
        DraftField::Email,
        DraftField::Phone,
        DraftField::Nationality,
        DraftField::DateOfBirth,
        DraftField::CurrentPosition,
        DraftField::YearsExperience,
        DraftField::PreviousEmployer,
        DraftField::LinkedinUrl,
        DraftField::AvailableStartDate,
        DraftField::SalaryExpectation,
        DraftField::AdditionalNotes,
    ];

    pub const IDENTITY: [DraftField; 4] = [
        DraftField::FirstName,
        DraftField::LastName,
        DraftField::Email,
        DraftField::Phone,
    ];

    pub const fn form_name(self) -> &'static str {
        match self {
            DraftField::FirstName => "firstName",
            DraftField::LastName => "lastName",
            DraftField::Email => "email",
            DraftField::Phone => "phone",
            DraftField::Nationality => "nationality",
            DraftField::DateOfBirth => "dateOfBirth",
            DraftField::CurrentPosition => "currentPosition",
            DraftField::YearsExperience => "yearsExperience",
            DraftField::PreviousEmployer => "previousEmployer",
            DraftField::LinkedinUrl => "linkedinUrl",
            DraftField::AvailableStartDate => "availableStartDate",
            DraftField::SalaryExpectation => "salaryExpectation",
            DraftField::AdditionalNotes => "additionalNotes",
        }
    }

    /// Column in the `career_applications` record.
    pub const fn column_name(self) -> &'static str {
        match self {
            DraftField::FirstName => "first_name",
            DraftField::LastName => "last_name",
            DraftField::Email => "email",
            DraftField::Phone => "phone",
            DraftField::Nationality => "nationality",
            DraftField::DateOfBirth => "date_of_birth",
            DraftField::CurrentPosition => "current_position",
            DraftField::YearsExperience => "years_experience",
            DraftField::PreviousEmployer => "previous_employer",
            DraftField::LinkedinUrl => "linkedin_url",
            DraftField::AvailableStartDate => "available_start_date",
            DraftField::SalaryExpectation => "salary_expectation",
            DraftField::AdditionalNotes => "additional_notes",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DraftField::FirstName => "First Name",
            DraftField::LastName => "Last Name",
            DraftField::Email => "Email Address",
            DraftField::Phone => "Phone Number",
            DraftField::Nationality => "Nationality",
            DraftField::DateOfBirth => "Date of Birth",
            DraftField::CurrentPosition => "Current Position",
            DraftField::YearsExperience => "Years of Experience",
            DraftField::PreviousEmployer => "Previous Employer",
            DraftField::LinkedinUrl => "LinkedIn Profile",
            DraftField::AvailableStartDate => "Available Start Date",
            DraftField::SalaryExpectation => "Salary Expectation",
            DraftField::AdditionalNotes => "Additional Notes",
        }
    }
}

impl FromStr for DraftField {
    type Err = ();

    /// Accepts both the camelCase form names and the snake_case column names.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.form_name() == raw || field.column_name() == raw)
            .ok_or(())
    }
}

/// In-progress applicant data owned by a single wizard session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub date_of_birth: Option<NaiveDate>,
    pub current_position: String,
    pub years_experience: Option<ExperienceBucket>,
    pub previous_employer: String,
    pub linkedin_url: String,
    pub cv_file: Option<SelectedFile>,
    pub cover_letter_file: Option<SelectedFile>,
    pub available_start_date: Option<NaiveDate>,
    pub salary_expectation: String,
    pub additional_notes: String,
}

impl ApplicationDraft {
    pub fn document(&self, kind: DocumentKind) -> Option<&SelectedFile> {
        match kind {
            DocumentKind::Cv => self.cv_file.as_ref(),
            DocumentKind::CoverLetter => self.cover_letter_file.as_ref(),
        }
    }

    pub(crate) fn document_slot(&mut self, kind: DocumentKind) -> &mut Option<SelectedFile> {
        match kind {
            DocumentKind::Cv => &mut self.cv_file,
            DocumentKind::CoverLetter => &mut self.cover_letter_file,
        }
    }

    /// Text value of a free-form field; `None` for dates and the experience bucket.
    pub fn text(&self, field: DraftField) -> Option<&str> {
        let value = match field {
            DraftField::FirstName => &self.first_name,
            DraftField::LastName => &self.last_name,
            DraftField::Email => &self.email,
            DraftField::Phone => &self.phone,
            DraftField::Nationality => &self.nationality,
            DraftField::CurrentPosition => &self.current_position,
            DraftField::PreviousEmployer => &self.previous_employer,
            DraftField::LinkedinUrl => &self.linkedin_url,
            DraftField::SalaryExpectation => &self.salary_expectation,
            DraftField::AdditionalNotes => &self.additional_notes,
            DraftField::DateOfBirth
            | DraftField::YearsExperience
            | DraftField::AvailableStartDate => return None,
        };
        Some(value.as_str())
    }

    pub(crate) fn text_slot(&mut self, field: DraftField) -> Option<&mut String> {
        let slot = match field {
            DraftField::FirstName => &mut self.first_name,
            DraftField::LastName => &mut self.last_name,
            DraftField::Email => &mut self.email,
            DraftField::Phone => &mut self.phone,
            DraftField::Nationality => &mut self.nationality,
            DraftField::CurrentPosition => &mut self.current_position,
            DraftField::PreviousEmployer => &mut self.previous_employer,
            DraftField::LinkedinUrl => &mut self.linkedin_url,
            DraftField::SalaryExpectation => &mut self.salary_expectation,
            DraftField::AdditionalNotes => &mut self.additional_notes,
            DraftField::DateOfBirth
            | DraftField::YearsExperience
            | DraftField::AvailableStartDate => return None,
        };
        Some(slot)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Row written to the `career_applications` collection.
///
/// Optional values serialize as explicit `null` so the store records absence
/// rather than falling back to column defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerApplicationRecord {
    pub job_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub current_position: Option<String>,
    pub years_experience: Option<u8>,
    pub previous_employer: Option<String>,
    pub linkedin_url: Option<String>,
    pub cv_url: Option<String>,
    pub cover_letter_url: Option<String>,
    pub available_start_date: Option<NaiveDate>,
    pub salary_expectation: Option<String>,
    pub additional_notes: Option<String>,
}

impl CareerApplicationRecord {
    pub fn from_draft(
        draft: &ApplicationDraft,
        job: Option<&JobReference>,
        cv: Option<&StorageRef>,
        cover_letter: Option<&StorageRef>,
    ) -> Self {
        Self {
            job_id: job.map(|job| job.id.clone()),
            first_name: draft.first_name.trim().to_string(),
            last_name: draft.last_name.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            nationality: non_empty(&draft.nationality),
            date_of_birth: draft.date_of_birth,
            current_position: non_empty(&draft.current_position),
            years_experience: draft.years_experience.map(ExperienceBucket::years),
            previous_employer: non_empty(&draft.previous_employer),
            linkedin_url: non_empty(&draft.linkedin_url),
            cv_url: cv.map(|reference| reference.0.clone()),
            cover_letter_url: cover_letter.map(|reference| reference.0.clone()),
            available_start_date: draft.available_start_date,
            salary_expectation: non_empty(&draft.salary_expectation),
            additional_notes: non_empty(&draft.additional_notes),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
