use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use tracing::debug;

use crate::config::BackendConfig;
use crate::workflows::careers::applications::{
    CareerApplicationRecord, ListingCatalog, ObjectStore, RecordStore, StoreError,
};
use crate::workflows::careers::listings::JobListing;

const USER_AGENT: &str = concat!("hotel-careers/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const APPLICATIONS_TABLE: &str = "career_applications";
const LISTINGS_TABLE: &str = "job_listings";

/// Client for the managed backend: a storage bucket for documents and
/// PostgREST-style tables for listings and applications.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
    bucket: String,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| StoreError::Transport("backend API key is not a valid header".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| StoreError::Transport("backend API key is not a valid header".into()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|err| StoreError::Transport(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
        })
    }

    pub fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            path.trim_start_matches('/')
        )
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

#[async_trait]
impl ObjectStore for RestBackend {
    async fn put(&self, path: &str, content_type: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let url = self.object_url(path);
        debug!(%url, size = bytes.len(), "uploading object");
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(transport_error)?;
        ensure_success(response).await.map(|_| ())
    }
}

#[async_trait]
impl RecordStore for RestBackend {
    async fn insert_application(&self, record: &CareerApplicationRecord) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.table_url(APPLICATIONS_TABLE))
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(transport_error)?;
        ensure_success(response).await.map(|_| ())
    }
}

#[async_trait]
impl ListingCatalog for RestBackend {
    async fn active_listings(&self) -> Result<Vec<JobListing>, StoreError> {
        let response = self
            .client
            .get(self.table_url(LISTINGS_TABLE))
            .query(&[
                ("select", "*"),
                ("is_active", "eq.true"),
                ("order", "created_at.desc"),
            ])
            .send()
            .await
            .map_err(transport_error)?;
        ensure_success(response)
            .await?
            .json::<Vec<JobListing>>()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Rejected {
        status: status.as_u16(),
        message,
    })
}
