//! Adapters for the warranty domain ports
//!
//! The in-memory adapters keep documents in process. They back the unit and
//! HTTP tests and let the API run without a database (`API_STORAGE=memory`).
//! The PostgreSQL adapters live in `infra_db`.

pub mod memory;

pub use memory::{InMemoryClaimStore, InMemoryServiceRequestStore};
