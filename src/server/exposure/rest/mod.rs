//! REST API exposure
//!
//! Entity routes live under `/v1`; health checks sit at the root.

use crate::server::entity_registry::EntityRegistry;
use crate::server::host::AppState;
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Prefix for every versioned API route
pub const API_PREFIX: &str = "/v1";

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router
    ///
    /// Returns a router with:
    /// - health check routes
    /// - entity routes nested under `/v1`
    /// - custom routes, also under `/v1`
    /// - request tracing and CORS layers
    pub fn build_router(
        state: AppState,
        registry: &EntityRegistry,
        custom_routes: Vec<Router<AppState>>,
    ) -> Result<Router> {
        let mut api = registry.build_routes();
        for custom_router in custom_routes {
            api = api.merge(custom_router);
        }

        let app = Self::health_routes()
            .nest(API_PREFIX, api)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state);

        Ok(app)
    }

    /// Build health check routes
    fn health_routes() -> Router<AppState> {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "yamdb"
        }))
    }
}
