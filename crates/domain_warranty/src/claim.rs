//! Warranty claim aggregate

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use core_kernel::{ClaimId, CoreError};
use crate::error::WarrantyError;

/// Keys owned by the lifecycle; never taken from a client payload
pub const RESERVED_FIELDS: [&str; 7] = [
    "id",
    "isDraft",
    "status",
    "draftSavedAt",
    "submittedDate",
    "createdAt",
    "updatedAt",
];

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Saved but not yet submitted
    Draft,
    /// Submitted and waiting for review
    Pending,
    /// Accepted by a reviewer
    Approved,
    /// Turned down by a reviewer
    Rejected,
    /// Service work finished
    Completed,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "Draft",
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(ClaimStatus::Draft),
            "Pending" => Ok(ClaimStatus::Pending),
            "Approved" => Ok(ClaimStatus::Approved),
            "Rejected" => Ok(ClaimStatus::Rejected),
            "Completed" => Ok(ClaimStatus::Completed),
            other => Err(CoreError::unknown_variant("claim status", other)),
        }
    }
}

/// A warranty or service claim
///
/// Claim fields other than the lifecycle ones are kept as a JSON object and
/// flattened into the document on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyClaim {
    /// Unique identifier
    pub id: ClaimId,
    /// True until the claim is published
    pub is_draft: bool,
    /// Status
    pub status: ClaimStatus,
    /// When the draft was saved; only meaningful while `is_draft` holds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_saved_at: Option<DateTime<Utc>>,
    /// When the claim entered review
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_date: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
    /// Vehicle number, description and any other client fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl WarrantyClaim {
    /// Creates a draft claim saved at `saved_at`
    pub fn draft(fields: Map<String, Value>, saved_at: DateTime<Utc>) -> Self {
        Self {
            id: ClaimId::new_v7(),
            is_draft: true,
            status: ClaimStatus::Draft,
            draft_saved_at: Some(saved_at),
            submitted_date: None,
            created_at: saved_at,
            updated_at: saved_at,
            fields: without_reserved(fields),
        }
    }

    /// Creates a claim that goes straight to review
    pub fn submitted(fields: Map<String, Value>, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: ClaimId::new_v7(),
            is_draft: false,
            status: ClaimStatus::Pending,
            draft_saved_at: None,
            submitted_date: Some(submitted_at),
            created_at: submitted_at,
            updated_at: submitted_at,
            fields: without_reserved(fields),
        }
    }

    /// Moves a draft into review
    pub fn publish(&mut self, at: DateTime<Utc>) -> Result<(), WarrantyError> {
        if !self.is_draft {
            return Err(WarrantyError::InvalidState {
                id: self.id,
                status: self.status,
                reason: "This is not a draft",
            });
        }
        self.is_draft = false;
        self.status = ClaimStatus::Pending;
        self.submitted_date = Some(at);
        self.updated_at = at;
        Ok(())
    }

    /// Returns a client field by name
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Checks that the draft flag and the status agree
    pub fn is_consistent(&self) -> bool {
        self.is_draft == (self.status == ClaimStatus::Draft)
    }
}

/// Drops lifecycle keys a client may have sent
pub fn without_reserved(mut fields: Map<String, Value>) -> Map<String, Value> {
    fields.retain(|key, _| !RESERVED_FIELDS.contains(&key.as_str()));
    fields
}
