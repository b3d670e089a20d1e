//! HTTP API Layer
//!
//! REST API for the vendor portal using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: warranty claims, service requests, health
//! - **Middleware**: Authentication, tracing, audit logging
//! - **DTOs**: Response envelopes
//! - **Error Handling**: `{ success: false, error, errors? }` responses
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_warranty::{InMemoryClaimStore, InMemoryServiceRequestStore};
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(
//!     Arc::new(InMemoryClaimStore::new()),
//!     Arc::new(InMemoryServiceRequestStore::new()),
//!     config,
//! );
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderName,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_warranty::{ClaimLifecycle, ClaimStorePort, ServiceRequestIntake, ServiceRequestPort};

use crate::config::ApiConfig;
use crate::handlers::{health, service_requests, warranty};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: ClaimLifecycle,
    pub intake: ServiceRequestIntake,
    pub claim_store: Arc<dyn ClaimStorePort>,
    pub request_store: Arc<dyn ServiceRequestPort>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the services over the given stores
    pub fn new(
        claim_store: Arc<dyn ClaimStorePort>,
        request_store: Arc<dyn ServiceRequestPort>,
        config: ApiConfig,
    ) -> Self {
        Self {
            lifecycle: ClaimLifecycle::new(claim_store.clone()),
            intake: ServiceRequestIntake::new(request_store.clone()),
            claim_store,
            request_store,
            config,
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static("x-request-id");

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let warranty_routes = Router::new()
        .route("/", post(warranty::submit))
        .route("/draft", post(warranty::save_draft))
        .route("/drafts", get(warranty::list_drafts))
        .route("/:id", get(warranty::get_claim))
        .route("/:id/publish", put(warranty::publish));

    let api_routes = Router::new()
        .nest("/warranty", warranty_routes)
        .route("/hsrp/requests", post(service_requests::submit_hsrp))
        .route("/rsa/requests", post(service_requests::submit_rsa))
        .route("/spare-parts/requests", post(service_requests::submit_spare_part))
        .route("/die-plans", post(service_requests::submit_die_plan))
        .route("/service-requests", get(service_requests::list_requests))
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
