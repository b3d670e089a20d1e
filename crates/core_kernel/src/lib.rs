//! Core Kernel - Foundational types shared by the vendor portal crates
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed identifiers for persisted documents
//! - Port traits and the unified port error used by storage adapters
//! - Common error type for parsing and state checks

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::{ClaimId, ServiceRequestId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use error::CoreError;
