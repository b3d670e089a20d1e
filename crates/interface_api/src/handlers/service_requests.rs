//! Service request handlers
//!
//! HSRP, RSA and spare-part requests are multipart forms: text fields plus
//! one file part named `document`. Only the file's metadata is kept.

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
        Multipart, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};
use tracing::debug;

use domain_validation::FileUpload;
use domain_warranty::{ServiceRequest, ServiceRequestKind};

use crate::dto::{DataResponse, ListResponse, ServiceRequestFilter};
use crate::{error::ApiError, AppState};

/// Multipart part carrying the supporting document
pub const DOCUMENT_FIELD: &str = "document";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

type Created = (StatusCode, Json<DataResponse<ServiceRequest>>);

pub async fn submit_hsrp(
    state: State<AppState>,
    form: Result<Multipart, MultipartRejection>,
) -> Result<Created, ApiError> {
    submit_form(state, ServiceRequestKind::Hsrp, form?).await
}

pub async fn submit_rsa(
    state: State<AppState>,
    form: Result<Multipart, MultipartRejection>,
) -> Result<Created, ApiError> {
    submit_form(state, ServiceRequestKind::Rsa, form?).await
}

pub async fn submit_spare_part(
    state: State<AppState>,
    form: Result<Multipart, MultipartRejection>,
) -> Result<Created, ApiError> {
    submit_form(state, ServiceRequestKind::SparePart, form?).await
}

/// Accepts a die plan as JSON; no document is taken
pub async fn submit_die_plan(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Created, ApiError> {
    let Json(payload) = payload?;
    let request = state
        .intake
        .submit(ServiceRequestKind::DiePlan, payload, None)
        .await?;
    Ok(created(request))
}

/// Lists service requests, newest first
pub async fn list_requests(
    State(state): State<AppState>,
    filter: Result<Query<ServiceRequestFilter>, QueryRejection>,
) -> Result<Json<ListResponse<ServiceRequest>>, ApiError> {
    let Query(filter) = filter?;
    let kind = filter
        .kind
        .as_deref()
        .map(str::parse::<ServiceRequestKind>)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let requests = state.intake.list(kind).await?;
    Ok(Json(ListResponse::new(requests)))
}

async fn submit_form(
    State(state): State<AppState>,
    kind: ServiceRequestKind,
    form: Multipart,
) -> Result<Created, ApiError> {
    let (fields, document) = read_form(form).await?;
    let request = state
        .intake
        .submit(kind, Value::Object(fields), document)
        .await?;
    Ok(created(request))
}

fn created(request: ServiceRequest) -> Created {
    (
        StatusCode::CREATED,
        Json(DataResponse::with_message("Request submitted successfully", request)),
    )
}

/// Splits a form into text fields and the document's metadata
///
/// An empty document part, as browsers send when no file was chosen, counts
/// as no document.
async fn read_form(
    mut form: Multipart,
) -> Result<(Map<String, Value>, Option<FileUpload>), ApiError> {
    let mut fields = Map::new();
    let mut document = None;

    while let Some(field) = form.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == DOCUMENT_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or(FALLBACK_CONTENT_TYPE)
                .to_string();
            let size_bytes = field.bytes().await?.len() as u64;

            if file_name.is_empty() && size_bytes == 0 {
                continue;
            }
            debug!(file = %file_name, content_type = %content_type, size_bytes, "Document received");
            document = Some(FileUpload::new(file_name, content_type, size_bytes));
        } else {
            let text = field.text().await?;
            fields.insert(name, Value::String(text));
        }
    }

    Ok((fields, document))
}
