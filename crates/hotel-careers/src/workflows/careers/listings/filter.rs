use serde::{Deserialize, Serialize};

use super::domain::JobListing;

/// Sentinel selections the careers page uses for "no department/location filter".
pub const ALL_DEPARTMENTS: &str = "All Departments";
pub const ALL_LOCATIONS: &str = "All Locations";

/// Search text combined with optional department and location selections.
///
/// All three criteria must hold for a listing to be included. The filter only
/// ever borrows the source listings, so the fetched catalog stays untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl ListingFilter {
    /// Builds a filter from raw UI selections, treating the "All ..." sentinels
    /// and blank values as no selection.
    pub fn from_selection(
        search: Option<&str>,
        department: Option<&str>,
        location: Option<&str>,
    ) -> Self {
        Self {
            search: search.map(str::trim).unwrap_or_default().to_string(),
            department: selection(department, ALL_DEPARTMENTS),
            location: selection(location, ALL_LOCATIONS),
        }
    }

    pub fn matches(&self, listing: &JobListing) -> bool {
        self.matches_search(listing)
            && self.matches_department(listing)
            && self.matches_location(listing)
    }

    pub fn apply<'a>(&self, listings: &'a [JobListing]) -> Vec<&'a JobListing> {
        listings
            .iter()
            .filter(|listing| self.matches(listing))
            .collect()
    }

    fn matches_search(&self, listing: &JobListing) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        listing.title.to_lowercase().contains(&needle)
            || listing.department.to_lowercase().contains(&needle)
    }

    fn matches_department(&self, listing: &JobListing) -> bool {
        self.department
            .as_deref()
            .map_or(true, |department| listing.department == department)
    }

    fn matches_location(&self, listing: &JobListing) -> bool {
        self.location
            .as_deref()
            .map_or(true, |location| listing.location == location)
    }
}

fn selection(raw: Option<&str>, sentinel: &str) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && *value != sentinel)
        .map(str::to_string)
}

/// Distinct departments and locations present in a set of listings, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingFacets {
    pub departments: Vec<String>,
    pub locations: Vec<String>,
}

impl ListingFacets {
    pub fn from_listings(listings: &[JobListing]) -> Self {
        let mut facets = Self::default();
        for listing in listings {
            if !facets.departments.contains(&listing.department) {
                facets.departments.push(listing.department.clone());
            }
            if !facets.locations.contains(&listing.location) {
                facets.locations.push(listing.location.clone());
            }
        }
        facets
    }
}

/// Headline shown above the filtered listings, e.g. "3 positions available".
pub fn availability_label(count: usize) -> String {
    if count == 1 {
        "1 position available".to_string()
    } else {
        format!("{count} positions available")
    }
}
