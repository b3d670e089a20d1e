//! Custom Test Assertions
//!
//! Assertion helpers that print the offending claim or violation list on
//! failure instead of a bare `false`.

use chrono::{DateTime, Utc};
use domain_validation::ValidationErrors;
use domain_warranty::{ClaimStatus, WarrantyClaim, WarrantyError};

/// Asserts that a claim is a consistent draft saved within `[after, before]`
pub fn assert_draft_saved_between(claim: &WarrantyClaim, after: DateTime<Utc>, before: DateTime<Utc>) {
    assert!(claim.is_draft, "Expected a draft, got {:?}", claim);
    assert_eq!(claim.status, ClaimStatus::Draft, "Draft with wrong status: {:?}", claim);
    let saved_at = claim
        .draft_saved_at
        .unwrap_or_else(|| panic!("Draft without draftSavedAt: {:?}", claim));
    assert!(
        after <= saved_at && saved_at <= before,
        "draftSavedAt {} outside [{}, {}]",
        saved_at,
        after,
        before
    );
}

/// Asserts that a claim has been published
pub fn assert_published(claim: &WarrantyClaim) {
    assert!(!claim.is_draft, "Expected a published claim, got {:?}", claim);
    assert_eq!(claim.status, ClaimStatus::Pending, "Published claim not pending: {:?}", claim);
    assert!(claim.submitted_date.is_some(), "Published claim without submittedDate: {:?}", claim);
}

/// Asserts that validation reported at least one violation for `field`
pub fn assert_violation(errors: &ValidationErrors, field: &str) {
    assert!(
        errors.has_field(field),
        "Expected a violation for '{}', got {:?}",
        field,
        errors.violations()
    );
}

/// Asserts that a lifecycle error is a validation failure naming `field`
pub fn assert_validation_error(error: &WarrantyError, field: &str) {
    match error {
        WarrantyError::Validation(errors) => assert_violation(errors, field),
        other => panic!("Expected validation error for '{}', got {:?}", field, other),
    }
}
