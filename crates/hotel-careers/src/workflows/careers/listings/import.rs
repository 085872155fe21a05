use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

use super::domain::JobListing;

/// Separator used inside the `requirements` column.
const REQUIREMENT_SEPARATOR: char = '|';

#[derive(Debug)]
pub enum ListingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidTimestamp { listing_id: String, value: String },
}

impl std::fmt::Display for ListingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingImportError::Io(err) => write!(f, "failed to read listings export: {}", err),
            ListingImportError::Csv(err) => write!(f, "invalid listings CSV data: {}", err),
            ListingImportError::InvalidTimestamp { listing_id, value } => write!(
                f,
                "listing {} has an unparseable created_at value '{}'",
                listing_id, value
            ),
        }
    }
}

impl std::error::Error for ListingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListingImportError::Io(err) => Some(err),
            ListingImportError::Csv(err) => Some(err),
            ListingImportError::InvalidTimestamp { .. } => None,
        }
    }
}

impl From<std::io::Error> for ListingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ListingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads job listings from a CSV export with the record store's column names.
pub fn listings_from_path(path: impl AsRef<Path>) -> Result<Vec<JobListing>, ListingImportError> {
    let file = std::fs::File::open(path)?;
    listings_from_reader(file)
}

pub fn listings_from_reader<R: Read>(reader: R) -> Result<Vec<JobListing>, ListingImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut listings = Vec::new();

    for record in csv_reader.deserialize::<ListingRow>() {
        let row = record?;
        listings.push(row.into_listing()?);
    }

    Ok(listings)
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    id: String,
    title: String,
    department: String,
    location: String,
    #[serde(rename = "type")]
    employment_type: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    requirements: Option<String>,
    created_at: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_active: Option<String>,
}

impl ListingRow {
    fn into_listing(self) -> Result<JobListing, ListingImportError> {
        let created_at = parse_timestamp(&self.created_at).ok_or_else(|| {
            ListingImportError::InvalidTimestamp {
                listing_id: self.id.clone(),
                value: self.created_at.clone(),
            }
        })?;

        let requirements = self
            .requirements
            .map(|raw| {
                raw.split(REQUIREMENT_SEPARATOR)
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let is_active = match self.is_active.as_deref() {
            None => true,
            Some(value) => matches!(
                value.to_ascii_lowercase().as_str(),
                "true" | "t" | "yes" | "1"
            ),
        };

        Ok(JobListing {
            id: self.id,
            title: self.title,
            department: self.department,
            location: self.location,
            employment_type: self.employment_type,
            description: self.description,
            requirements,
            created_at,
            is_active,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
