//! Warranty claim handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;

use core_kernel::ClaimId;
use domain_warranty::{WarrantyClaim, WarrantyError};

use crate::dto::{DataResponse, ListResponse};
use crate::{error::ApiError, AppState};

/// Saves a partially completed claim as a draft
pub async fn save_draft(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<WarrantyClaim>>), ApiError> {
    let Json(payload) = payload?;
    let claim = state.lifecycle.save_draft(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message("Draft saved successfully", claim)),
    ))
}

/// Lists drafts, most recently saved first
pub async fn list_drafts(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<WarrantyClaim>>, ApiError> {
    let drafts = state.lifecycle.list_drafts().await?;
    Ok(Json(ListResponse::new(drafts)))
}

/// Publishes a draft for review
pub async fn publish(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<DataResponse<WarrantyClaim>>, ApiError> {
    let Path(id) = id?;
    let Ok(id) = id.parse::<ClaimId>() else {
        return Err(draft_not_found());
    };

    let claim = state.lifecycle.publish(id).await.map_err(|e| match e {
        WarrantyError::NotFound(_) => draft_not_found(),
        other => other.into(),
    })?;

    Ok(Json(DataResponse::with_message("Draft published successfully", claim)))
}

/// Submits a complete claim directly for review
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<WarrantyClaim>>), ApiError> {
    let Json(payload) = payload?;
    let claim = state.lifecycle.submit(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message("Claim submitted successfully", claim)),
    ))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<DataResponse<WarrantyClaim>>, ApiError> {
    let Path(id) = id?;
    let id: ClaimId = id
        .parse()
        .map_err(|_| ApiError::NotFound("Claim not found".to_string()))?;
    let claim = state.lifecycle.get(id).await?;
    Ok(Json(DataResponse::new(claim)))
}

fn draft_not_found() -> ApiError {
    ApiError::NotFound("Draft not found".to_string())
}
