//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication, permission, and rate limit middleware
//! - The session issuer
//! - Error responses

pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware};
use ledgerly_core::auth::PermissionTable;
use ledgerly_db::PettyCashRepository;
use ledgerly_shared::{
    JwtService,
    config::{LedgerConfig, RateLimitConfig},
};
use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::rate_limit::{ClientRateLimit, ip_rate_limit_middleware};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Immutable role to permission table.
    pub permissions: Arc<PermissionTable>,
    /// Per-client token bucket limiter.
    pub rate_limit: ClientRateLimit,
    /// Serializes debits when set.
    pub debit_lock: Option<Arc<Mutex<()>>>,
}

impl AppState {
    /// Builds the state from its collaborators and settings.
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        jwt_service: JwtService,
        rate_limit: &RateLimitConfig,
        ledger: &LedgerConfig,
    ) -> Self {
        Self {
            db: Arc::new(db),
            jwt_service: Arc::new(jwt_service),
            permissions: Arc::new(PermissionTable::standard()),
            rate_limit: ClientRateLimit::new(
                rate_limit.per_second,
                rate_limit.burst,
                rate_limit.trust_forwarded_for,
            ),
            debit_lock: ledger
                .serialize_debits
                .then(|| Arc::new(Mutex::new(()))),
        }
    }

    /// Petty cash repository honoring the configured debit lock.
    #[must_use]
    pub fn petty_cash_repo(&self) -> PettyCashRepository {
        let repo = PettyCashRepository::new((*self.db).clone());
        match &self.debit_lock {
            Some(lock) => repo.with_debit_lock(Arc::clone(lock)),
            None => repo,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes_with_state(state.clone()))
        .layer(axum_middleware::from_fn_with_state(
            state.rate_limit.clone(),
            ip_rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
