use std::sync::Arc;

use chrono::NaiveDate;

use super::common::*;
use crate::workflows::careers::applications::domain::{
    DocumentKind, DraftField, ExperienceBucket, SelectedFile,
};
use crate::workflows::careers::applications::review::ReviewSection;
use crate::workflows::careers::applications::submission::SubmissionError;
use crate::workflows::careers::applications::validation::ValidationError;
use crate::workflows::careers::applications::wizard::{WizardPhase, WizardState, WizardStep};

#[test]
fn opens_empty_at_first_step() {
    let wizard = WizardState::open(None);
    assert_eq!(wizard.step(), WizardStep::Identity);
    assert_eq!(wizard.phase(), WizardPhase::Editing);
    assert_eq!(wizard.heading(), "Career Application");
    assert!(wizard.draft().first_name.is_empty());

    let for_job = WizardState::open(Some(job()));
    assert_eq!(for_job.heading(), "Front Desk Agent");
}

#[test]
fn update_field_touches_only_the_named_field() {
    let mut wizard = WizardState::open(None);
    fill_identity(&mut wizard);
    let before = wizard.draft().clone();

    wizard
        .update_field(DraftField::Nationality, "Turkish")
        .expect("nationality");

    let mut expected = before;
    expected.nationality = "Turkish".to_string();
    assert_eq!(wizard.draft(), &expected);
}

#[test]
fn experience_bucket_parses_form_values() {
    let mut wizard = WizardState::open(None);
    wizard
        .update_field(DraftField::YearsExperience, "6")
        .expect("known bucket");
    assert_eq!(
        wizard.draft().years_experience,
        Some(ExperienceBucket::SixToTenYears)
    );

    assert_eq!(
        wizard.update_field(DraftField::YearsExperience, "4"),
        Err(ValidationError::UnknownExperienceBucket("4".to_string()))
    );
    assert_eq!(
        wizard.draft().years_experience,
        Some(ExperienceBucket::SixToTenYears)
    );

    wizard
        .update_field(DraftField::YearsExperience, "")
        .expect("clearing");
    assert!(wizard.draft().years_experience.is_none());
}

#[test]
fn dates_parse_or_are_rejected() {
    let mut wizard = WizardState::open(None);
    wizard
        .update_named_field("availableStartDate", "2025-06-01")
        .expect("valid date");
    assert_eq!(
        wizard.draft().available_start_date,
        NaiveDate::from_ymd_opt(2025, 6, 1)
    );

    match wizard.update_field(DraftField::DateOfBirth, "01/02/1990") {
        Err(ValidationError::InvalidDate { field, .. }) => {
            assert_eq!(field, DraftField::DateOfBirth)
        }
        other => panic!("expected invalid date, got {other:?}"),
    }
    assert!(wizard.draft().date_of_birth.is_none());
}

#[test]
fn unknown_form_names_are_reported() {
    let mut wizard = WizardState::open(None);
    assert_eq!(
        wizard.update_named_field("favouriteColour", "green"),
        Err(ValidationError::UnknownField("favouriteColour".to_string()))
    );
    wizard
        .update_named_field("first_name", "Ayşe")
        .expect("snake case alias");
    assert_eq!(wizard.draft().first_name, "Ayşe");
}

#[test]
fn advance_is_blocked_until_identity_is_complete() {
    let mut wizard = WizardState::open(None);
    assert!(!wizard.advance());
    assert_eq!(wizard.step(), WizardStep::Identity);

    fill_identity(&mut wizard);
    assert!(wizard.advance());
    assert_eq!(wizard.step(), WizardStep::Experience);
    assert!(wizard.advance());
    assert_eq!(wizard.step(), WizardStep::Documents);

    assert!(!wizard.advance(), "CV is required to leave the documents step");
    wizard
        .attach(DocumentKind::Cv, pdf("cv.pdf", 2048))
        .expect("cv attaches");
    assert!(wizard.advance());
    assert_eq!(wizard.step(), WizardStep::Review);

    assert!(!wizard.advance(), "review is the last step");
    assert_eq!(wizard.step(), WizardStep::Review);
}

#[test]
fn retreat_is_floored_at_first_step() {
    let mut wizard = WizardState::open(None);
    assert!(!wizard.retreat());
    assert_eq!(wizard.step(), WizardStep::Identity);

    fill_identity(&mut wizard);
    wizard.advance();
    assert!(wizard.retreat());
    assert_eq!(wizard.step(), WizardStep::Identity);
}

#[test]
fn go_to_only_jumps_backwards() {
    let mut wizard = WizardState::open(None);
    fill_identity(&mut wizard);
    wizard
        .attach(DocumentKind::Cv, pdf("cv.pdf", 2048))
        .expect("cv attaches");
    wizard.advance_to_review().expect("reaches review");

    assert!(!wizard.go_to(WizardStep::Review));
    assert!(wizard.go_to(WizardStep::Experience));
    assert_eq!(wizard.step(), WizardStep::Experience);
    assert!(!wizard.go_to(WizardStep::Review));
}

#[test]
fn step_numbers_clamp_into_range() {
    assert_eq!(WizardStep::clamped(-3), WizardStep::Identity);
    assert_eq!(WizardStep::clamped(3), WizardStep::Documents);
    assert_eq!(WizardStep::clamped(9), WizardStep::Review);
    assert_eq!(WizardStep::Review.number(), 4);
}

#[test]
fn advance_to_review_reports_blocking_step() {
    let mut wizard = WizardState::open(None);
    fill_identity(&mut wizard);
    assert_eq!(wizard.advance_to_review(), Err(ValidationError::MissingCv));
    assert_eq!(wizard.step(), WizardStep::Documents);
}

#[test]
fn rejected_files_are_not_attached() {
    let mut wizard = WizardState::open(None);
    wizard
        .attach(DocumentKind::Cv, pdf("cv.pdf", 1024))
        .expect("valid cv");

    let oversized = pdf("huge.pdf", 11 * MIB);
    assert!(matches!(
        wizard.attach(DocumentKind::Cv, oversized),
        Err(ValidationError::FileTooLarge { .. })
    ));
    assert_eq!(
        wizard.draft().cv_file.as_ref().map(|file| file.name.as_str()),
        Some("cv.pdf")
    );

    let image = SelectedFile::new("letter.png", "image/png", vec![0; 1024]);
    assert!(wizard.attach(DocumentKind::CoverLetter, image).is_err());
    assert!(wizard.draft().cover_letter_file.is_none());
}

#[test]
fn detach_clears_the_slot() {
    let mut wizard = WizardState::open(None);
    wizard
        .attach(DocumentKind::CoverLetter, pdf("letter.pdf", 1024))
        .expect("attaches");
    let removed = wizard.detach(DocumentKind::CoverLetter).expect("detaches");
    assert_eq!(removed.map(|file| file.name), Some("letter.pdf".to_string()));
    assert!(wizard.draft().cover_letter_file.is_none());
}

#[tokio::test]
async fn submit_without_cv_never_reaches_the_network() {
    let objects = Arc::new(ScriptedObjects::default());
    let records = Arc::new(ScriptedRecords::default());
    let coordinator = coordinator(objects.clone(), records.clone());

    let mut wizard = WizardState::open(None);
    fill_identity(&mut wizard);

    match wizard.submit(&coordinator).await {
        Err(SubmissionError::Incomplete(ValidationError::MissingCv)) => {}
        other => panic!("expected incomplete submission, got {other:?}"),
    }
    assert!(objects.paths().is_empty());
    assert!(records.records().is_empty());
    assert_eq!(wizard.phase(), WizardPhase::Editing);
}

#[tokio::test]
async fn successful_submit_discards_draft_and_closes_session() {
    let objects = Arc::new(ScriptedObjects::default());
    let records = Arc::new(ScriptedRecords::default());
    let coordinator = coordinator(objects.clone(), records.clone());

    let mut wizard = WizardState::open(Some(job()));
    fill_identity(&mut wizard);
    wizard
        .attach(DocumentKind::Cv, pdf("cv.pdf", 4096))
        .expect("cv attaches");

    let receipt = wizard.submit(&coordinator).await.expect("submission succeeds");
    assert_eq!(receipt.job_id.as_deref(), Some("job-front-desk"));
    assert_eq!(wizard.phase(), WizardPhase::Submitted);
    assert!(wizard.draft().cv_file.is_none());
    assert!(wizard.draft().first_name.is_empty());

    assert_eq!(
        wizard.update_field(DraftField::FirstName, "Jane"),
        Err(ValidationError::SessionClosed)
    );
    assert!(!wizard.retreat());
}

#[tokio::test]
async fn failed_submit_keeps_draft_for_retry() {
    let objects = Arc::new(ScriptedObjects::default());
    let records = Arc::new(ScriptedRecords::rejecting());
    let coordinator = coordinator(objects, records);

    let mut wizard = WizardState::open(None);
    fill_identity(&mut wizard);
    wizard
        .attach(DocumentKind::Cv, pdf("cv.pdf", 4096))
        .expect("cv attaches");

    assert!(wizard.submit(&coordinator).await.is_err());
    assert_eq!(wizard.phase(), WizardPhase::Editing);
    assert_eq!(wizard.draft().first_name, "John");
    assert!(wizard.draft().cv_file.is_some());
}

fn section<'a>(sections: &'a [ReviewSection], title: &str) -> &'a ReviewSection {
    sections
        .iter()
        .find(|section| section.title == title)
        .expect("review section present")
}

#[test]
fn review_falls_back_for_blank_answers() {
    let mut wizard = WizardState::open(Some(job()));
    fill_identity(&mut wizard);
    wizard
        .update_field(DraftField::SalaryExpectation, "   ")
        .expect("salary");

    let sections = wizard.review();
    let titles: Vec<_> = sections.iter().map(|section| section.title).collect();
    assert_eq!(
        titles,
        vec!["Personal Information", "Professional Experience", "Documents"]
    );

    let personal = section(&sections, "Personal Information");
    assert_eq!(personal.value("Full Name"), Some("John Smith"));
    assert_eq!(personal.value("Email Address"), Some("john@x.com"));
    assert_eq!(personal.value("Nationality"), Some("Not specified"));
    assert_eq!(personal.value("Date of Birth"), Some("Not specified"));

    let experience = section(&sections, "Professional Experience");
    assert_eq!(experience.value("Years of Experience"), Some("Not specified"));
    assert_eq!(experience.value("Available Start Date"), Some("Immediate"));
    assert_eq!(experience.value("Salary Expectation"), Some("Negotiable"));

    let documents = section(&sections, "Documents");
    assert_eq!(documents.value("CV / Resume"), Some("Not uploaded"));
    assert_eq!(documents.value("Cover Letter"), Some("Not uploaded"));
    assert_eq!(wizard.job().map(|job| job.id.as_str()), Some("job-front-desk"));
}

#[test]
fn review_shows_provided_answers() {
    let mut wizard = WizardState::open(None);
    fill_identity(&mut wizard);
    wizard
        .update_field(DraftField::YearsExperience, "3")
        .expect("bucket");
    wizard
        .update_field(DraftField::AvailableStartDate, "2025-06-01")
        .expect("date");
    wizard
        .update_field(DraftField::SalaryExpectation, "EUR 1,800")
        .expect("salary");
    wizard
        .attach(DocumentKind::Cv, pdf("john-smith.pdf", 512))
        .expect("cv attaches");

    let sections = wizard.review();
    let experience = section(&sections, "Professional Experience");
    assert_eq!(experience.value("Years of Experience"), Some("3+ years"));
    assert_eq!(experience.value("Available Start Date"), Some("2025-06-01"));
    assert_eq!(experience.value("Salary Expectation"), Some("EUR 1,800"));
    assert_eq!(
        section(&sections, "Documents").value("CV / Resume"),
        Some("john-smith.pdf")
    );
}

#[test]
fn every_field_parses_from_form_and_column_names() {
    for field in DraftField::ALL {
        assert_eq!(field.form_name().parse::<DraftField>(), Ok(field));
        assert_eq!(field.column_name().parse::<DraftField>(), Ok(field));
    }
}
