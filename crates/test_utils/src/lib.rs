//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! vendor portal test suite.
//!
//! # Modules
//!
//! - `fixtures`: Ready-made request payloads and uploads
//! - `builders`: Builder for warranty claims in a chosen state
//! - `stores`: Store doubles, including one that always fails
//! - `assertions`: Assertion helpers for claims and validation results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod stores;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use stores::*;
pub use assertions::*;
pub use generators::*;
