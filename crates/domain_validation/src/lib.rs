//! Request Validation Gate
//!
//! This crate rejects malformed input before any handler mutates state. A
//! request shape is described by a [`RuleSet`]: an ordered list of rule
//! descriptors (field, kind, message, optional sibling-field condition)
//! evaluated by one interpreter. Every rule runs, so callers get the full
//! list of violations instead of the first one.
//!
//! # Example
//!
//! ```rust
//! use domain_validation::rulesets;
//! use serde_json::json;
//!
//! let payload = json!({ "action": "reject", "reason": "" });
//! let errors = rulesets::admin_operation().check(payload).unwrap_err();
//! assert!(errors.has_field("reason"));
//! ```
//!
//! Uploaded files go through a separate gate, [`UploadConstraints`], which
//! checks presence, size and declared content type.

pub mod rule;
pub mod gate;
pub mod rulesets;
pub mod upload;

pub use rule::{Rule, RuleKind, Condition, Pattern, PhoneLocale};
pub use gate::{RuleSet, Violation, ValidationErrors};
pub use upload::{FileUpload, UploadConstraints, UploadRejection, MAX_UPLOAD_BYTES};
