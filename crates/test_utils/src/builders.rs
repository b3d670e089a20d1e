//! Test Data Builders
//!
//! Builds warranty claims in a chosen state with explicit timestamps, so
//! ordering tests do not depend on the wall clock.

use chrono::{DateTime, Duration, TimeZone, Utc};
use domain_warranty::{ClaimStatus, WarrantyClaim};
use serde_json::{Map, Value};

/// Builder for constructing warranty claims
pub struct WarrantyClaimBuilder {
    fields: Map<String, Value>,
    saved_at: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
    status: Option<ClaimStatus>,
}

impl Default for WarrantyClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WarrantyClaimBuilder {
    /// Creates a builder for a draft saved at a fixed instant
    pub fn new() -> Self {
        Self {
            fields: Map::new(),
            saved_at: base_time(),
            published_at: None,
            status: None,
        }
    }

    /// Sets a client field
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Sets the draft save time
    pub fn saved_at(mut self, at: DateTime<Utc>) -> Self {
        self.saved_at = at;
        self
    }

    /// Sets the draft save time relative to the base instant
    pub fn saved_minutes_after_base(self, minutes: i64) -> Self {
        self.saved_at(base_time() + Duration::minutes(minutes))
    }

    /// Publishes the draft one hour after it was saved
    pub fn published(mut self) -> Self {
        self.published_at = Some(self.saved_at + Duration::hours(1));
        self
    }

    /// Publishes the draft and moves it on to a review status
    pub fn reviewed(mut self, status: ClaimStatus) -> Self {
        self = self.published();
        self.status = Some(status);
        self
    }

    /// Builds the claim
    pub fn build(self) -> WarrantyClaim {
        let mut claim = WarrantyClaim::draft(self.fields, self.saved_at);
        if let Some(at) = self.published_at {
            claim
                .publish(at)
                .expect("freshly built draft can be published");
        }
        if let Some(status) = self.status {
            claim.status = status;
        }
        claim
    }
}

/// Fixed instant used as the default save time
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}
