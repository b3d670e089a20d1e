//! Domain Adapters
//!
//! PostgreSQL implementations of the warranty domain's store ports.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_db::adapters::PostgresClaimStore;
//! use domain_warranty::ClaimLifecycle;
//!
//! let lifecycle = ClaimLifecycle::new(Arc::new(PostgresClaimStore::new(pool)));
//! ```

pub mod warranty;

pub use warranty::{PostgresClaimStore, PostgresServiceRequestStore};
