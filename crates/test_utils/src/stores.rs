//! Store Test Doubles
//!
//! Wiring helpers for the in-memory stores and a claim store whose every
//! call fails, for exercising the persistence-failure path.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use core_kernel::{
    AdapterHealth, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_warranty::{
    ClaimLifecycle, ClaimQuery, ClaimStorePort, InMemoryClaimStore, InMemoryServiceRequestStore,
    ServiceRequestIntake, WarrantyClaim,
};

/// Message carried by every [`FailingClaimStore`] error
pub const STORE_FAILURE_MESSAGE: &str = "document store unavailable";

/// Claim store that fails every operation
#[derive(Debug, Default)]
pub struct FailingClaimStore;

impl FailingClaimStore {
    fn error() -> PortError {
        PortError::connection(STORE_FAILURE_MESSAGE)
    }
}

impl DomainPort for FailingClaimStore {}

#[async_trait]
impl HealthCheckable for FailingClaimStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: "failing-claim-store".to_string(),
            status: AdapterHealth::Unhealthy,
            latency_ms: 0,
            message: Some(STORE_FAILURE_MESSAGE.to_string()),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ClaimStorePort for FailingClaimStore {
    async fn find_by_id(&self, _id: ClaimId) -> Result<Option<WarrantyClaim>, PortError> {
        Err(Self::error())
    }

    async fn find(&self, _query: ClaimQuery) -> Result<Vec<WarrantyClaim>, PortError> {
        Err(Self::error())
    }

    async fn create(&self, _claim: &WarrantyClaim) -> Result<WarrantyClaim, PortError> {
        Err(Self::error())
    }

    async fn save(&self, _claim: &WarrantyClaim) -> Result<WarrantyClaim, PortError> {
        Err(Self::error())
    }
}

/// A lifecycle service over a fresh in-memory store, with the store handle
pub fn in_memory_lifecycle() -> (ClaimLifecycle, Arc<InMemoryClaimStore>) {
    let store = Arc::new(InMemoryClaimStore::new());
    (ClaimLifecycle::new(store.clone()), store)
}

/// A lifecycle service over a pre-populated in-memory store
pub async fn seeded_lifecycle(claims: Vec<WarrantyClaim>) -> (ClaimLifecycle, Arc<InMemoryClaimStore>) {
    let store = Arc::new(InMemoryClaimStore::with_claims(claims).await);
    (ClaimLifecycle::new(store.clone()), store)
}

/// An intake service over a fresh in-memory store, with the store handle
pub fn in_memory_intake() -> (ServiceRequestIntake, Arc<InMemoryServiceRequestStore>) {
    let store = Arc::new(InMemoryServiceRequestStore::new());
    (ServiceRequestIntake::new(store.clone()), store)
}
