use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{ApplicationDraft, DocumentKind, DraftField};

const NOT_SPECIFIED: &str = "Not specified";
const NOT_UPLOADED: &str = "Not uploaded";
const IMMEDIATE: &str = "Immediate";
const NEGOTIABLE: &str = "Negotiable";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewEntry {
    pub label: &'static str,
    pub value: String,
}

/// One titled block of the summary shown before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSection {
    pub title: &'static str,
    pub entries: Vec<ReviewEntry>,
}

impl ReviewSection {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.value.as_str())
    }
}

/// Personal, professional and document sections with display fallbacks for
/// anything the applicant left blank.
pub fn review_sections(draft: &ApplicationDraft) -> Vec<ReviewSection> {
    vec![
        ReviewSection {
            title: "Personal Information",
            entries: vec![
                entry("Full Name", draft.full_name()),
                text_entry(draft, DraftField::Email, NOT_SPECIFIED),
                text_entry(draft, DraftField::Phone, NOT_SPECIFIED),
                text_entry(draft, DraftField::Nationality, NOT_SPECIFIED),
                date_entry(DraftField::DateOfBirth, draft.date_of_birth, NOT_SPECIFIED),
            ],
        },
        ReviewSection {
            title: "Professional Experience",
            entries: vec![
                text_entry(draft, DraftField::CurrentPosition, NOT_SPECIFIED),
                entry(
                    DraftField::YearsExperience.label(),
                    match draft.years_experience {
                        Some(bucket) => format!("{}+ years", bucket.years()),
                        None => NOT_SPECIFIED.to_string(),
                    },
                ),
                text_entry(draft, DraftField::PreviousEmployer, NOT_SPECIFIED),
                text_entry(draft, DraftField::LinkedinUrl, NOT_SPECIFIED),
                date_entry(
                    DraftField::AvailableStartDate,
                    draft.available_start_date,
                    IMMEDIATE,
                ),
                text_entry(draft, DraftField::SalaryExpectation, NEGOTIABLE),
            ],
        },
        ReviewSection {
            title: "Documents",
            entries: [DocumentKind::Cv, DocumentKind::CoverLetter]
                .into_iter()
                .map(|kind| {
                    let value = match draft.document(kind) {
                        Some(file) => file.name.clone(),
                        None => NOT_UPLOADED.to_string(),
                    };
                    entry(kind.label(), value)
                })
                .collect(),
        },
    ]
}

fn entry(label: &'static str, value: String) -> ReviewEntry {
    ReviewEntry { label, value }
}

fn text_entry(draft: &ApplicationDraft, field: DraftField, fallback: &str) -> ReviewEntry {
    let value = draft
        .text(field)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback);
    entry(field.label(), value.to_string())
}

fn date_entry(field: DraftField, date: Option<NaiveDate>, fallback: &str) -> ReviewEntry {
    let value = match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => fallback.to_string(),
    };
    entry(field.label(), value)
}
