//! Warranty Domain Ports
//!
//! The lifecycle and intake services depend only on these traits. The
//! document store behind them is addressed by identifier and supports
//! find-by-id, find-by-predicate with a sort order, create, and save.
//!
//! # Adapters
//!
//! - **In-memory**: [`crate::adapters::InMemoryClaimStore`], used in tests
//!   and for running the API without a database
//! - **PostgreSQL**: `infra_db::adapters::PostgresClaimStore`, JSONB documents
//!
//! ```rust,ignore
//! let store: Arc<dyn ClaimStorePort> = match config.storage {
//!     Storage::Memory => Arc::new(InMemoryClaimStore::new()),
//!     Storage::Postgres => Arc::new(PostgresClaimStore::new(pool)),
//! };
//! let lifecycle = ClaimLifecycle::new(store);
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, PortError};

use crate::claim::{ClaimStatus, WarrantyClaim};
use crate::service_request::{ServiceRequest, ServiceRequestKind};

/// Sort order for claim queries
///
/// Ties are broken by insertion order, most recently inserted first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClaimOrder {
    /// Most recently saved draft first; claims without a save time last
    #[default]
    DraftSavedDesc,
    /// Most recently created first
    CreatedDesc,
}

/// Query parameters for finding claims
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClaimQuery {
    /// Filter by draft flag
    pub is_draft: Option<bool>,
    /// Filter by status
    pub status: Option<ClaimStatus>,
    /// Sort order
    pub order: ClaimOrder,
}

impl ClaimQuery {
    /// All drafts, most recently saved first
    pub fn drafts() -> Self {
        Self {
            is_draft: Some(true),
            order: ClaimOrder::DraftSavedDesc,
            ..Default::default()
        }
    }

    /// Returns true if `claim` passes the filters
    pub fn matches(&self, claim: &WarrantyClaim) -> bool {
        self.is_draft.map_or(true, |d| claim.is_draft == d)
            && self.status.map_or(true, |s| claim.status == s)
    }
}

/// Document store for warranty claims
#[async_trait]
pub trait ClaimStorePort: DomainPort + HealthCheckable {
    /// Looks a claim up by identifier
    async fn find_by_id(&self, id: ClaimId) -> Result<Option<WarrantyClaim>, PortError>;

    /// Returns claims matching the query in the requested order
    async fn find(&self, query: ClaimQuery) -> Result<Vec<WarrantyClaim>, PortError>;

    /// Inserts a new claim
    ///
    /// Fails with `PortError::Conflict` if the identifier is already stored.
    async fn create(&self, claim: &WarrantyClaim) -> Result<WarrantyClaim, PortError>;

    /// Replaces a stored claim
    ///
    /// Fails with `PortError::NotFound` if the identifier is not stored.
    async fn save(&self, claim: &WarrantyClaim) -> Result<WarrantyClaim, PortError>;
}

/// Document store for service requests
#[async_trait]
pub trait ServiceRequestPort: DomainPort + HealthCheckable {
    /// Inserts a new request
    async fn create(&self, request: &ServiceRequest) -> Result<ServiceRequest, PortError>;

    /// Lists requests, newest first, optionally restricted to one kind
    async fn find(&self, kind: Option<ServiceRequestKind>) -> Result<Vec<ServiceRequest>, PortError>;
}
