//! Warranty Claims Domain
//!
//! This crate owns the warranty claim lifecycle and the intake of the other
//! service requests the portal accepts (HSRP, RSA, spare parts, die plans).
//!
//! # Claim Lifecycle
//!
//! ```text
//! Save Draft -> Draft --publish--> Pending -> (review states owned elsewhere)
//! ```
//!
//! Publishing is one-way and not idempotent: publishing a claim that is no
//! longer a draft is an error, and nothing is written.

pub mod claim;
pub mod service_request;
pub mod lifecycle;
pub mod intake;
pub mod ports;
pub mod adapters;
pub mod error;

pub use claim::{WarrantyClaim, ClaimStatus};
pub use service_request::{ServiceRequest, ServiceRequestKind, RequestStatus};
pub use lifecycle::ClaimLifecycle;
pub use intake::ServiceRequestIntake;
pub use ports::{ClaimStorePort, ClaimQuery, ClaimOrder, ServiceRequestPort};
pub use adapters::{InMemoryClaimStore, InMemoryServiceRequestStore};
pub use error::WarrantyError;
