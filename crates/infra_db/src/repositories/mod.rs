//! Repository implementations
//!
//! Repositories own the SQL and work in row types; the adapters in
//! [`crate::adapters`] translate rows to domain documents.

pub mod warranty;
pub mod service_requests;

pub use warranty::{ClaimDocumentRow, ClaimFilter, ClaimSort, WarrantyClaimRepository};
pub use service_requests::{ServiceRequestRepository, ServiceRequestRow};
