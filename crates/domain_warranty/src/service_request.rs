//! Service requests accepted by the portal besides warranty claims

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use core_kernel::{CoreError, ServiceRequestId};
use domain_validation::{rulesets, FileUpload, RuleSet};

/// Kind of service request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceRequestKind {
    /// High security registration plate
    Hsrp,
    /// Road-side assistance
    Rsa,
    SparePart,
    DiePlan,
}

impl ServiceRequestKind {
    pub const ALL: [ServiceRequestKind; 4] = [
        ServiceRequestKind::Hsrp,
        ServiceRequestKind::Rsa,
        ServiceRequestKind::SparePart,
        ServiceRequestKind::DiePlan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceRequestKind::Hsrp => "hsrp",
            ServiceRequestKind::Rsa => "rsa",
            ServiceRequestKind::SparePart => "spare_part",
            ServiceRequestKind::DiePlan => "die_plan",
        }
    }

    /// Field rules for this kind of request
    pub fn rule_set(&self) -> &'static RuleSet {
        match self {
            ServiceRequestKind::Hsrp => rulesets::hsrp_request(),
            ServiceRequestKind::Rsa => rulesets::rsa_request(),
            ServiceRequestKind::SparePart => rulesets::spare_part_request(),
            ServiceRequestKind::DiePlan => rulesets::die_plan(),
        }
    }

    /// Whether a supporting document must be uploaded
    pub fn requires_attachment(&self) -> bool {
        !matches!(self, ServiceRequestKind::DiePlan)
    }
}

impl fmt::Display for ServiceRequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceRequestKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceRequestKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::unknown_variant("service request kind", s))
    }
}

/// Request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Submitted,
}

/// A submitted service request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: ServiceRequestId,
    pub kind: ServiceRequestKind,
    pub status: RequestStatus,
    pub submitted_at: DateTime<Utc>,
    /// Metadata of the supporting document, if one was uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<FileUpload>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Keys owned by the intake; never taken from a client payload
pub const RESERVED_FIELDS: [&str; 5] = ["id", "kind", "status", "submittedAt", "attachment"];

impl ServiceRequest {
    pub fn new(
        kind: ServiceRequestKind,
        mut fields: Map<String, Value>,
        attachment: Option<FileUpload>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        fields.retain(|key, _| !RESERVED_FIELDS.contains(&key.as_str()));
        Self {
            id: ServiceRequestId::new_v7(),
            kind,
            status: RequestStatus::Submitted,
            submitted_at,
            attachment,
            fields,
        }
    }
}
