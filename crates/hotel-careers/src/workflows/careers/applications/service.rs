use std::sync::Arc;

use serde::Serialize;

use super::store::{ListingCatalog, StoreError};
use super::submission::SubmissionCoordinator;
use super::wizard::WizardState;
use crate::workflows::careers::listings::{
    availability_label, JobListing, ListingFacets, ListingFilter,
};

/// Filtered view over the active listings, with the facets for the filter dropdowns.
#[derive(Debug, Clone, Serialize)]
pub struct ListingPage {
    pub listings: Vec<JobListing>,
    pub facets: ListingFacets,
    pub total_active: usize,
    pub availability: String,
}

/// Service composing the listing catalog with the submission pipeline.
pub struct CareersService {
    catalog: Arc<dyn ListingCatalog>,
    coordinator: SubmissionCoordinator,
}

impl CareersService {
    pub fn new(catalog: Arc<dyn ListingCatalog>, coordinator: SubmissionCoordinator) -> Self {
        Self {
            catalog,
            coordinator,
        }
    }

    pub fn coordinator(&self) -> &SubmissionCoordinator {
        &self.coordinator
    }

    pub async fn listings(
        &self,
        filter: &ListingFilter,
    ) -> Result<ListingPage, CareersServiceError> {
        let active = self.catalog.active_listings().await?;
        let facets = ListingFacets::from_listings(&active);
        let listings: Vec<JobListing> = filter.apply(&active).into_iter().cloned().collect();

        Ok(ListingPage {
            availability: availability_label(listings.len()),
            total_active: active.len(),
            facets,
            listings,
        })
    }

    pub async fn listing(&self, id: &str) -> Result<JobListing, CareersServiceError> {
        self.catalog
            .active_listings()
            .await?
            .into_iter()
            .find(|listing| listing.id == id)
            .ok_or_else(|| CareersServiceError::ListingNotFound(id.to_string()))
    }

    /// Opens a wizard for a specific active listing, or a general application
    /// when `job_id` is `None`.
    pub async fn open_application(
        &self,
        job_id: Option<&str>,
    ) -> Result<WizardState, CareersServiceError> {
        let job = match job_id {
            Some(id) => Some(self.listing(id).await?.reference()),
            None => None,
        };
        Ok(WizardState::open(job))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CareersServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("job listing '{0}' is not open for applications")]
    ListingNotFound(String),
}
