//! Warranty domain errors

use thiserror::Error;

use core_kernel::{ClaimId, PortError};
use domain_validation::{UploadRejection, ValidationErrors};

use crate::claim::ClaimStatus;

/// Errors that can occur in the warranty domain
#[derive(Debug, Error)]
pub enum WarrantyError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Upload(#[from] UploadRejection),

    #[error("Claim not found: {0}")]
    NotFound(ClaimId),

    #[error("{reason}")]
    InvalidState {
        id: ClaimId,
        status: ClaimStatus,
        reason: &'static str,
    },

    #[error("Persistence failure: {0}")]
    Persistence(#[from] PortError),
}

impl WarrantyError {
    /// Returns true if the caller can fix the input and retry
    pub fn is_client_error(&self) -> bool {
        !matches!(self, WarrantyError::Persistence(_))
    }
}
