//! In-memory document stores

use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{
    ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError, ServiceRequestId,
};

use crate::claim::WarrantyClaim;
use crate::ports::{ClaimOrder, ClaimQuery, ClaimStorePort, ServiceRequestPort};
use crate::service_request::{ServiceRequest, ServiceRequestKind};

/// A stored document with its insertion sequence number
#[derive(Debug, Clone)]
struct Stored<T> {
    seq: u64,
    doc: T,
}

/// In-memory implementation of [`ClaimStorePort`]
#[derive(Debug, Default)]
pub struct InMemoryClaimStore {
    claims: RwLock<HashMap<ClaimId, Stored<WarrantyClaim>>>,
    next_seq: AtomicU64,
    writes: AtomicU64,
}

impl InMemoryClaimStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store, in order, for testing
    pub async fn with_claims(claims: Vec<WarrantyClaim>) -> Self {
        let store = Self::new();
        {
            let mut map = store.claims.write().await;
            for claim in claims {
                let seq = store.next_seq.fetch_add(1, Ordering::SeqCst);
                map.insert(claim.id, Stored { seq, doc: claim });
            }
        }
        store
    }

    /// Number of successful create and save calls
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.claims.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.claims.read().await.is_empty()
    }
}

fn compare_claims(order: ClaimOrder, a: &Stored<WarrantyClaim>, b: &Stored<WarrantyClaim>) -> CmpOrdering {
    let primary = match order {
        ClaimOrder::DraftSavedDesc => b.doc.draft_saved_at.cmp(&a.doc.draft_saved_at),
        ClaimOrder::CreatedDesc => b.doc.created_at.cmp(&a.doc.created_at),
    };
    primary.then_with(|| b.seq.cmp(&a.seq))
}

impl DomainPort for InMemoryClaimStore {}

#[async_trait]
impl HealthCheckable for InMemoryClaimStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("memory-claim-store")
    }
}

#[async_trait]
impl ClaimStorePort for InMemoryClaimStore {
    async fn find_by_id(&self, id: ClaimId) -> Result<Option<WarrantyClaim>, PortError> {
        Ok(self.claims.read().await.get(&id).map(|s| s.doc.clone()))
    }

    async fn find(&self, query: ClaimQuery) -> Result<Vec<WarrantyClaim>, PortError> {
        let claims = self.claims.read().await;
        let mut matched: Vec<&Stored<WarrantyClaim>> =
            claims.values().filter(|s| query.matches(&s.doc)).collect();
        matched.sort_by(|a, b| compare_claims(query.order, a, b));
        Ok(matched.into_iter().map(|s| s.doc.clone()).collect())
    }

    async fn create(&self, claim: &WarrantyClaim) -> Result<WarrantyClaim, PortError> {
        let mut claims = self.claims.write().await;
        if claims.contains_key(&claim.id) {
            return Err(PortError::Conflict {
                message: format!("Claim {} already exists", claim.id),
            });
        }
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        claims.insert(claim.id, Stored { seq, doc: claim.clone() });
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(claim.clone())
    }

    async fn save(&self, claim: &WarrantyClaim) -> Result<WarrantyClaim, PortError> {
        let mut claims = self.claims.write().await;
        let stored = claims
            .get_mut(&claim.id)
            .ok_or_else(|| PortError::not_found("WarrantyClaim", claim.id))?;
        stored.doc = claim.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(claim.clone())
    }
}

/// In-memory implementation of [`ServiceRequestPort`]
#[derive(Debug, Default)]
pub struct InMemoryServiceRequestStore {
    requests: RwLock<HashMap<ServiceRequestId, Stored<ServiceRequest>>>,
    next_seq: AtomicU64,
}

impl InMemoryServiceRequestStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.requests.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.requests.read().await.is_empty()
    }
}

impl DomainPort for InMemoryServiceRequestStore {}

#[async_trait]
impl HealthCheckable for InMemoryServiceRequestStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("memory-service-request-store")
    }
}

#[async_trait]
impl ServiceRequestPort for InMemoryServiceRequestStore {
    async fn create(&self, request: &ServiceRequest) -> Result<ServiceRequest, PortError> {
        let mut requests = self.requests.write().await;
        if requests.contains_key(&request.id) {
            return Err(PortError::Conflict {
                message: format!("Service request {} already exists", request.id),
            });
        }
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        requests.insert(request.id, Stored { seq, doc: request.clone() });
        Ok(request.clone())
    }

    async fn find(&self, kind: Option<ServiceRequestKind>) -> Result<Vec<ServiceRequest>, PortError> {
        let requests = self.requests.read().await;
        let mut matched: Vec<&Stored<ServiceRequest>> = requests
            .values()
            .filter(|s| kind.map_or(true, |k| s.doc.kind == k))
            .collect();
        matched.sort_by(|a, b| {
            b.doc
                .submitted_at
                .cmp(&a.doc.submitted_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });
        Ok(matched.into_iter().map(|s| s.doc.clone()).collect())
    }
}
