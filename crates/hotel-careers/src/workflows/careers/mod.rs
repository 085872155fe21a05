pub mod applications;
pub mod backend;
pub mod listings;

pub use applications::{CareersService, SubmissionCoordinator, WizardState};
pub use listings::{JobListing, ListingFilter};
