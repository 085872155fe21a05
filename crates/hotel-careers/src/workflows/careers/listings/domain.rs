use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Open position advertised on the careers page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub department: String,
    pub location: String,
    #[serde(rename = "type")]
    pub employment_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub requirements: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl JobListing {
    /// Lightweight reference carried by an application tied to this listing.
    pub fn reference(&self) -> JobReference {
        JobReference {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// Identifier and display title of the listing an applicant is applying for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReference {
    pub id: String,
    pub title: String,
}

/// Orders listings newest first, the order the catalog exposes them in.
pub fn sort_newest_first(listings: &mut [JobListing]) {
    listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn default_active() -> bool {
    true
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
