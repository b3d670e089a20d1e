//! Service request intake
//!
//! HSRP, RSA and spare-part requests arrive with a supporting document; die
//! plans do not. The upload gate runs first, then the field rules for the
//! request kind, then the request is persisted.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use domain_validation::{FileUpload, UploadConstraints};

use crate::error::WarrantyError;
use crate::lifecycle::into_fields;
use crate::ports::ServiceRequestPort;
use crate::service_request::{ServiceRequest, ServiceRequestKind};

/// Application service accepting service requests
#[derive(Clone)]
pub struct ServiceRequestIntake {
    store: Arc<dyn ServiceRequestPort>,
    uploads: UploadConstraints,
}

impl ServiceRequestIntake {
    /// Creates the service with the default upload constraints
    pub fn new(store: Arc<dyn ServiceRequestPort>) -> Self {
        Self::with_constraints(store, UploadConstraints::default())
    }

    pub fn with_constraints(store: Arc<dyn ServiceRequestPort>, uploads: UploadConstraints) -> Self {
        Self { store, uploads }
    }

    pub fn upload_constraints(&self) -> &UploadConstraints {
        &self.uploads
    }

    /// Validates and persists a request
    ///
    /// An attachment sent with a kind that does not take one is ignored.
    pub async fn submit(
        &self,
        kind: ServiceRequestKind,
        payload: Value,
        attachment: Option<FileUpload>,
    ) -> Result<ServiceRequest, WarrantyError> {
        let attachment = if kind.requires_attachment() {
            if let Err(rejection) = self.uploads.check(attachment.as_ref()) {
                warn!(kind = %kind, reason = %rejection, "Upload rejected");
                return Err(rejection.into());
            }
            attachment
        } else {
            None
        };

        let fields = into_fields(kind.rule_set().check(payload)?)?;
        let request = ServiceRequest::new(kind, fields, attachment, Utc::now());

        let created = self.store.create(&request).await?;
        info!(request_id = %created.id, kind = %kind, "Service request submitted");
        Ok(created)
    }

    /// Lists requests, newest first
    pub async fn list(
        &self,
        kind: Option<ServiceRequestKind>,
    ) -> Result<Vec<ServiceRequest>, WarrantyError> {
        Ok(self.store.find(kind).await?)
    }
}
