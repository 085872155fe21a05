//! Integration scenarios for the career application wizard and listings catalog.
//!
//! Everything runs through the public service facade against the in-memory backend,
//! so the storage paths and stored records are observed the same way the API sees them.

mod common {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use hotel_careers::workflows::careers::applications::{
        CareersService, Clock, DocumentKind, DraftField, SelectedFile, SubmissionCoordinator,
        WizardState,
    };
    use hotel_careers::workflows::careers::backend::InMemoryBackend;
    use hotel_careers::workflows::careers::JobListing;

    pub(super) const STAMP: i64 = 1_750_000_000_000;

    pub(super) struct FrozenClock;

    impl Clock for FrozenClock {
        fn now_millis(&self) -> i64 {
            STAMP
        }
    }

    fn listing(id: &str, title: &str, department: &str, location: &str, month: u32) -> JobListing {
        JobListing {
            id: id.to_string(),
            title: title.to_string(),
            department: department.to_string(),
            location: location.to_string(),
            employment_type: "Seasonal".to_string(),
            description: None,
            requirements: Vec::new(),
            created_at: Utc
                .with_ymd_and_hms(2025, month, 1, 8, 0, 0)
                .single()
                .expect("valid timestamp"),
            is_active: true,
        }
    }

    pub(super) fn catalog() -> Vec<JobListing> {
        vec![
            listing("chef-1", "Chef de Partie", "Kitchen", "Sarigerme", 1),
            listing("fd-1", "Front Desk Agent", "Front Office", "Marmaris", 2),
            listing("fd-2", "Night Auditor", "Front Office", "Sarigerme", 3),
        ]
    }

    pub(super) fn build_service() -> (Arc<CareersService>, InMemoryBackend) {
        let backend = InMemoryBackend::with_listings(catalog());
        let store = Arc::new(backend.clone());
        let coordinator =
            SubmissionCoordinator::with_clock(store.clone(), store.clone(), Arc::new(FrozenClock));
        (Arc::new(CareersService::new(store, coordinator)), backend)
    }

    pub(super) fn fill_identity(wizard: &mut WizardState) {
        for (field, value) in [
            (DraftField::FirstName, "Elif"),
            (DraftField::LastName, "Kaya"),
            (DraftField::Email, "elif@example.com"),
            (DraftField::Phone, "+90 555 000 0000"),
        ] {
            wizard.update_field(field, value).expect("identity field");
        }
    }

    pub(super) fn attach_pdf(wizard: &mut WizardState, kind: DocumentKind, name: &str) {
        wizard
            .attach(
                kind,
                SelectedFile::new(name, "application/pdf", b"%PDF-1.7".to_vec()),
            )
            .expect("pdf accepted");
    }
}

mod listings {
    use super::common::*;
    use hotel_careers::workflows::careers::ListingFilter;

    #[tokio::test]
    async fn department_filter_keeps_facets_for_all_active_listings() {
        let (service, _) = build_service();
        let filter = ListingFilter::from_selection(None, Some("Front Office"), None);

        let page = service.listings(&filter).await.expect("listings load");

        let ids: Vec<_> = page.listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["fd-2", "fd-1"]);
        assert_eq!(page.total_active, 3);
        assert_eq!(
            page.facets.departments,
            vec!["Front Office".to_string(), "Kitchen".to_string()]
        );
    }

    #[tokio::test]
    async fn search_and_location_combine() {
        let (service, _) = build_service();
        let filter = ListingFilter::from_selection(Some("  AUDITOR "), None, Some("Sarigerme"));

        let page = service.listings(&filter).await.expect("listings load");
        assert_eq!(page.listings.len(), 1);
        assert_eq!(page.listings[0].title, "Night Auditor");
    }
}

mod wizard {
    use super::common::*;
    use hotel_careers::workflows::careers::applications::{
        CareersServiceError, DocumentKind, DraftField, WizardPhase, WizardStep,
    };

    #[tokio::test]
    async fn applying_for_a_listing_stores_documents_and_record() {
        let (service, backend) = build_service();
        let mut wizard = service
            .open_application(Some("fd-1"))
            .await
            .expect("listing is open");
        assert_eq!(wizard.heading(), "Front Desk Agent");

        fill_identity(&mut wizard);
        assert!(wizard.advance());
        wizard
            .update_field(DraftField::YearsExperience, "11")
            .expect("bucket");
        wizard
            .update_field(DraftField::AvailableStartDate, "2025-07-15")
            .expect("date");
        assert!(wizard.advance());
        attach_pdf(&mut wizard, DocumentKind::Cv, "elif-kaya.pdf");
        attach_pdf(&mut wizard, DocumentKind::CoverLetter, "letter.pdf");
        assert!(wizard.advance());
        assert_eq!(wizard.step(), WizardStep::Review);

        let receipt = wizard
            .submit(service.coordinator())
            .await
            .expect("submission succeeds");
        assert_eq!(wizard.phase(), WizardPhase::Submitted);

        let paths: Vec<String> = backend.objects().into_keys().collect();
        assert_eq!(
            paths,
            vec![
                format!("applications/{STAMP}-cv.pdf"),
                format!("applications/{}-cover-letter.pdf", STAMP + 1),
            ]
        );

        let records = backend.applications();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.job_id.as_deref(), Some("fd-1"));
        assert_eq!(record.years_experience, Some(11));
        assert_eq!(
            record.cv_url.as_deref(),
            receipt.cv.as_ref().map(|r| r.as_str())
        );
        assert_eq!(
            serde_json::to_value(record).expect("record serializes")["salary_expectation"],
            serde_json::Value::Null
        );
    }

    #[tokio::test]
    async fn closed_listing_cannot_be_applied_for() {
        let (service, _) = build_service();
        match service.open_application(Some("missing")).await {
            Err(CareersServiceError::ListingNotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("expected missing listing, got {:?}", other.map(|w| w.step())),
        }
    }

    #[tokio::test]
    async fn general_application_has_no_job() {
        let (service, backend) = build_service();
        let mut wizard = service.open_application(None).await.expect("general");
        fill_identity(&mut wizard);
        attach_pdf(&mut wizard, DocumentKind::Cv, "cv.pdf");

        wizard
            .submit(service.coordinator())
            .await
            .expect("submission succeeds");
        assert!(backend.applications()[0].job_id.is_none());
    }
}
