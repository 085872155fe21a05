use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::domain::{DocumentKind, DraftField, SelectedFile};
use super::service::{CareersService, CareersServiceError};
use super::submission::{SubmissionError, SUCCESS_MESSAGE};
use super::validation::{ValidationError, MAX_DOCUMENT_BYTES};
use super::wizard::WizardState;
use crate::workflows::careers::listings::ListingFilter;

/// Request bodies may carry both documents at the size limit plus the text fields.
pub const MAX_APPLICATION_BODY_BYTES: usize =
    (2 * MAX_DOCUMENT_BYTES as usize) + 4 * 1024 * 1024;

/// Router builder exposing the careers listings and application intake.
pub fn careers_router(service: Arc<CareersService>) -> Router {
    Router::new()
        .route("/api/v1/careers/listings", get(listings_handler))
        .route("/api/v1/careers/listings/:listing_id", get(listing_handler))
        .route(
            "/api/v1/careers/applications",
            post(apply_handler).layer(DefaultBodyLimit::max(MAX_APPLICATION_BODY_BYTES)),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListingQuery {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

pub(crate) async fn listings_handler(
    State(service): State<Arc<CareersService>>,
    Query(query): Query<ListingQuery>,
) -> Response {
    let filter = ListingFilter::from_selection(
        query.search.as_deref(),
        query.department.as_deref(),
        query.location.as_deref(),
    );

    match service.listings(&filter).await {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn listing_handler(
    State(service): State<Arc<CareersService>>,
    Path(listing_id): Path<String>,
) -> Response {
    match service.listing(&listing_id).await {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(err) => service_error_response(err),
    }
}

/// Multipart form as posted by the application wizard.
#[derive(Debug, Default)]
struct ApplicationForm {
    job_id: Option<String>,
    fields: Vec<(String, String)>,
    documents: Vec<(DocumentKind, SelectedFile)>,
}

pub(crate) async fn apply_handler(
    State(service): State<Arc<CareersService>>,
    multipart: Multipart,
) -> Response {
    let form = match read_application_form(multipart).await {
        Ok(form) => form,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };

    let mut wizard = match service.open_application(form.job_id.as_deref()).await {
        Ok(wizard) => wizard,
        Err(err) => return service_error_response(err),
    };

    if let Err(err) = populate_wizard(&mut wizard, form) {
        return validation_response(&err);
    }

    match wizard.submit(service.coordinator()).await {
        Ok(receipt) => {
            let payload = json!({
                "status": "submitted",
                "message": SUCCESS_MESSAGE,
                "receipt": receipt,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Incomplete(err)) => validation_response(&err),
        Err(err) => {
            warn!(
                error = %err,
                orphaned = err.orphaned().len(),
                "career application submission failed"
            );
            error_response(StatusCode::BAD_GATEWAY, err.user_message())
        }
    }
}

async fn read_application_form(mut multipart: Multipart) -> Result<ApplicationForm, String> {
    let mut form = ApplicationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| format!("malformed application form: {err}"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let kind = match name.as_str() {
            "cvFile" | "cv_file" => Some(DocumentKind::Cv),
            "coverLetterFile" | "cover_letter_file" => Some(DocumentKind::CoverLetter),
            _ => None,
        };

        if let Some(kind) = kind {
            // Browsers send an unnamed empty part when no file was chosen.
            let file_name = field
                .file_name()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string);
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| format!("could not read {}: {err}", kind.label()))?;
            if let Some(file_name) = file_name {
                form.documents
                    .push((kind, SelectedFile::new(file_name, mime_type, bytes.to_vec())));
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|err| format!("could not read field '{name}': {err}"))?;
        match name.as_str() {
            "jobId" | "job_id" => {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    form.job_id = Some(trimmed.to_string());
                }
            }
            _ => form.fields.push((name, value)),
        }
    }

    Ok(form)
}

fn populate_wizard(wizard: &mut WizardState, form: ApplicationForm) -> Result<(), ValidationError> {
    for (name, value) in &form.fields {
        match name.parse::<DraftField>() {
            Ok(field) => wizard.update_field(field, value)?,
            Err(()) => debug!(field = %name, "ignoring unrecognised application form field"),
        }
    }
    for (kind, file) in form.documents {
        wizard.attach(kind, file)?;
    }
    wizard.advance_to_review()
}

fn validation_response(err: &ValidationError) -> Response {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
}

fn service_error_response(err: CareersServiceError) -> Response {
    match err {
        CareersServiceError::ListingNotFound(_) => {
            error_response(StatusCode::NOT_FOUND, err.to_string())
        }
        CareersServiceError::Store(store) => {
            warn!(error = %store, "careers record store unavailable");
            error_response(StatusCode::BAD_GATEWAY, store.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, axum::Json(payload)).into_response()
}
