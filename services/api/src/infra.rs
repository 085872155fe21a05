use hotel_careers::config::AppConfig;
use hotel_careers::error::AppError;
use hotel_careers::workflows::careers::applications::{CareersService, SubmissionCoordinator};
use hotel_careers::workflows::careers::backend::{InMemoryBackend, RestBackend};
use hotel_careers::workflows::careers::listings::{listings_from_path, listings_from_reader};
use hotel_careers::workflows::careers::JobListing;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

/// Listings bundled with the binary, used when neither a backend nor a CSV is configured.
const SAMPLE_LISTINGS: &str = include_str!("../../../crates/hotel-careers/job_listings.csv");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn sample_listings() -> Result<Vec<JobListing>, AppError> {
    Ok(listings_from_reader(SAMPLE_LISTINGS.as_bytes())?)
}

pub(crate) fn seed_listings(csv: Option<&Path>) -> Result<Vec<JobListing>, AppError> {
    match csv {
        Some(path) => {
            let listings = listings_from_path(path)?;
            info!(path = %path.display(), count = listings.len(), "seeded listings from CSV");
            Ok(listings)
        }
        None => sample_listings(),
    }
}

/// Wires the careers service to the managed backend when one is configured,
/// otherwise to an in-memory backend seeded with listings.
pub(crate) fn build_careers_service(config: &AppConfig) -> Result<Arc<CareersService>, AppError> {
    if let Some(backend) = &config.backend {
        let rest = Arc::new(RestBackend::new(backend)?);
        info!(url = %backend.url, bucket = %backend.bucket, "using managed careers backend");
        let coordinator = SubmissionCoordinator::new(rest.clone(), rest.clone());
        return Ok(Arc::new(CareersService::new(rest, coordinator)));
    }

    let memory = InMemoryBackend::with_listings(seed_listings(config.listings_csv.as_deref())?);
    info!("no backend configured; applications are kept in memory");
    Ok(Arc::new(in_memory_service(memory)))
}

pub(crate) fn in_memory_service(backend: InMemoryBackend) -> CareersService {
    let store = Arc::new(backend);
    let coordinator = SubmissionCoordinator::new(store.clone(), store.clone());
    CareersService::new(store, coordinator)
}
