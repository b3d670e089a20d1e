//! PostgreSQL Warranty Adapters
//!
//! Bridges the `ClaimStorePort` and `ServiceRequestPort` traits to the
//! repositories. Documents are stored whole in JSONB; the filter and sort
//! columns are derived from the document on each write.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_warranty::{
    ClaimOrder, ClaimQuery, ClaimStorePort, ServiceRequest, ServiceRequestKind,
    ServiceRequestPort, WarrantyClaim,
};

use crate::error::DatabaseError;
use crate::repositories::{
    ClaimDocumentRow, ClaimFilter, ClaimSort, ServiceRequestRepository, ServiceRequestRow,
    WarrantyClaimRepository,
};

/// PostgreSQL-backed implementation of [`ClaimStorePort`]
#[derive(Debug, Clone)]
pub struct PostgresClaimStore {
    repository: WarrantyClaimRepository,
}

impl PostgresClaimStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: WarrantyClaimRepository::new(pool),
        }
    }

    pub fn repository(&self) -> &WarrantyClaimRepository {
        &self.repository
    }
}

impl DomainPort for PostgresClaimStore {}

#[async_trait]
impl HealthCheckable for PostgresClaimStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let result = self.repository.ping().await;
        health_result("postgres-claim-store", start, result)
    }
}

#[async_trait]
impl ClaimStorePort for PostgresClaimStore {
    #[instrument(skip(self), fields(claim_id = %id))]
    async fn find_by_id(&self, id: ClaimId) -> Result<Option<WarrantyClaim>, PortError> {
        debug!("Fetching claim by ID");
        self.repository
            .get_by_id(id.into())
            .await?
            .map(row_to_claim)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find(&self, query: ClaimQuery) -> Result<Vec<WarrantyClaim>, PortError> {
        let (filter, sort) = query_to_filter(&query);
        let rows = self.repository.find(&filter, sort).await?;
        debug!(count = rows.len(), "Claims found");
        rows.into_iter().map(row_to_claim).collect()
    }

    #[instrument(skip(self, claim), fields(claim_id = %claim.id))]
    async fn create(&self, claim: &WarrantyClaim) -> Result<WarrantyClaim, PortError> {
        self.repository.insert(&claim_to_row(claim)?).await?;
        Ok(claim.clone())
    }

    #[instrument(skip(self, claim), fields(claim_id = %claim.id))]
    async fn save(&self, claim: &WarrantyClaim) -> Result<WarrantyClaim, PortError> {
        self.repository.update(&claim_to_row(claim)?).await?;
        Ok(claim.clone())
    }
}

/// PostgreSQL-backed implementation of [`ServiceRequestPort`]
#[derive(Debug, Clone)]
pub struct PostgresServiceRequestStore {
    repository: ServiceRequestRepository,
}

impl PostgresServiceRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ServiceRequestRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresServiceRequestStore {}

#[async_trait]
impl HealthCheckable for PostgresServiceRequestStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let result = self.repository.ping().await;
        health_result("postgres-service-request-store", start, result)
    }
}

#[async_trait]
impl ServiceRequestPort for PostgresServiceRequestStore {
    #[instrument(skip(self, request), fields(request_id = %request.id, kind = %request.kind))]
    async fn create(&self, request: &ServiceRequest) -> Result<ServiceRequest, PortError> {
        self.repository.insert(&request_to_row(request)?).await?;
        Ok(request.clone())
    }

    #[instrument(skip(self))]
    async fn find(&self, kind: Option<ServiceRequestKind>) -> Result<Vec<ServiceRequest>, PortError> {
        let rows = self.repository.find(kind.map(|k| k.as_str())).await?;
        rows.into_iter().map(row_to_request).collect()
    }
}

fn health_result(
    adapter_id: &str,
    start: Instant,
    result: Result<(), DatabaseError>,
) -> HealthCheckResult {
    let latency_ms = start.elapsed().as_millis() as u64;
    let (status, message) = match result {
        Ok(()) => (AdapterHealth::Healthy, None),
        Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
    };
    HealthCheckResult {
        adapter_id: adapter_id.to_string(),
        status,
        latency_ms,
        message,
        checked_at: Utc::now(),
    }
}

fn query_to_filter(query: &ClaimQuery) -> (ClaimFilter, ClaimSort) {
    let filter = ClaimFilter {
        is_draft: query.is_draft,
        status: query.status.map(|s| s.as_str().to_string()),
    };
    let sort = match query.order {
        ClaimOrder::DraftSavedDesc => ClaimSort::DraftSavedDesc,
        ClaimOrder::CreatedDesc => ClaimSort::CreatedDesc,
    };
    (filter, sort)
}

fn claim_to_row(claim: &WarrantyClaim) -> Result<ClaimDocumentRow, PortError> {
    let doc = serde_json::to_value(claim).map_err(DatabaseError::from)?;
    Ok(ClaimDocumentRow {
        id: claim.id.into(),
        is_draft: claim.is_draft,
        status: claim.status.as_str().to_string(),
        draft_saved_at: claim.draft_saved_at,
        created_at: claim.created_at,
        updated_at: claim.updated_at,
        doc: Json(doc),
    })
}

fn row_to_claim(row: ClaimDocumentRow) -> Result<WarrantyClaim, PortError> {
    let claim: WarrantyClaim =
        serde_json::from_value(row.doc.0).map_err(DatabaseError::from)?;
    if claim.id != ClaimId::from(row.id) {
        return Err(PortError::transformation(format!(
            "Claim document id {} does not match row {}",
            claim.id, row.id
        )));
    }
    Ok(claim)
}

fn request_to_row(request: &ServiceRequest) -> Result<ServiceRequestRow, PortError> {
    let doc = serde_json::to_value(request).map_err(DatabaseError::from)?;
    Ok(ServiceRequestRow {
        id: request.id.into(),
        kind: request.kind.as_str().to_string(),
        submitted_at: request.submitted_at,
        doc: Json(doc),
    })
}

fn row_to_request(row: ServiceRequestRow) -> Result<ServiceRequest, PortError> {
    Ok(serde_json::from_value(row.doc.0).map_err(DatabaseError::from)?)
}
