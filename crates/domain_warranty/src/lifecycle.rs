//! Claim lifecycle service
//!
//! Owns the legal transitions of a warranty claim:
//!
//! - **Save Draft**: validate, stamp as `Draft`, persist a new record
//! - **List Drafts**: drafts only, most recently saved first
//! - **Publish**: `Draft` to `Pending`, exactly one read and one write
//! - **Submit**: create a claim directly in `Pending`
//!
//! Store failures are not retried; they surface as
//! [`WarrantyError::Persistence`] with the port error attached.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{info, warn};

use core_kernel::ClaimId;
use domain_validation::{rulesets, RuleSet, ValidationErrors, Violation};
use domain_validation::gate::PAYLOAD_FIELD;

use crate::claim::WarrantyClaim;
use crate::error::WarrantyError;
use crate::ports::{ClaimQuery, ClaimStorePort};

/// Application service for the warranty claim lifecycle
#[derive(Clone)]
pub struct ClaimLifecycle {
    store: Arc<dyn ClaimStorePort>,
    draft_rules: RuleSet,
    submission_rules: RuleSet,
}

impl ClaimLifecycle {
    /// Creates the service with the built-in rule sets
    pub fn new(store: Arc<dyn ClaimStorePort>) -> Self {
        Self::with_rules(
            store,
            rulesets::warranty_draft().clone(),
            rulesets::warranty_submission().clone(),
        )
    }

    /// Creates the service with explicit rule sets for drafts and submissions
    pub fn with_rules(
        store: Arc<dyn ClaimStorePort>,
        draft_rules: RuleSet,
        submission_rules: RuleSet,
    ) -> Self {
        Self {
            store,
            draft_rules,
            submission_rules,
        }
    }

    /// Validates a payload and persists it as a new draft
    pub async fn save_draft(&self, payload: Value) -> Result<WarrantyClaim, WarrantyError> {
        let fields = into_fields(self.draft_rules.check(payload)?)?;
        let claim = WarrantyClaim::draft(fields, Utc::now());

        let created = self.store.create(&claim).await?;
        info!(claim_id = %created.id, "Warranty draft saved");
        Ok(created)
    }

    /// Returns every draft, most recently saved first
    pub async fn list_drafts(&self) -> Result<Vec<WarrantyClaim>, WarrantyError> {
        Ok(self.store.find(ClaimQuery::drafts()).await?)
    }

    /// Moves a draft into review
    pub async fn publish(&self, id: ClaimId) -> Result<WarrantyClaim, WarrantyError> {
        let mut claim = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(WarrantyError::NotFound(id))?;

        if let Err(e) = claim.publish(Utc::now()) {
            warn!(claim_id = %id, status = %claim.status, "Publish rejected: claim is not a draft");
            return Err(e);
        }

        let saved = self.store.save(&claim).await?;
        info!(claim_id = %saved.id, "Warranty draft published");
        Ok(saved)
    }

    /// Looks a claim up by identifier
    pub async fn get(&self, id: ClaimId) -> Result<WarrantyClaim, WarrantyError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(WarrantyError::NotFound(id))
    }

    /// Validates a complete payload and creates the claim directly in review
    pub async fn submit(&self, payload: Value) -> Result<WarrantyClaim, WarrantyError> {
        let fields = into_fields(self.submission_rules.check(payload)?)?;
        let claim = WarrantyClaim::submitted(fields, Utc::now());

        let created = self.store.create(&claim).await?;
        info!(claim_id = %created.id, "Warranty claim submitted");
        Ok(created)
    }
}

/// Unwraps a validated payload into its fields
pub(crate) fn into_fields(payload: Value) -> Result<Map<String, Value>, ValidationErrors> {
    match payload {
        Value::Object(fields) => Ok(fields),
        _ => Err(ValidationErrors::new(vec![Violation::new(
            PAYLOAD_FIELD,
            "Request body must be a JSON object",
        )])),
    }
}
