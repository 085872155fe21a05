//! Job listings shown on the careers page and the filters applied over them.

pub mod domain;
pub mod filter;
pub mod import;

pub use domain::{sort_newest_first, JobListing, JobReference};
pub use filter::{
    availability_label, ListingFacets, ListingFilter, ALL_DEPARTMENTS, ALL_LOCATIONS,
};
pub use import::{listings_from_path, listings_from_reader, ListingImportError};
