//! Framing price quotation service.

pub mod config;
pub mod error;
pub mod pricing;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::SharedPricingConfig;

/// State shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pricing: Arc<SharedPricingConfig>,
}

impl AppState {
    pub fn new(pricing: SharedPricingConfig) -> Self {
        Self {
            pricing: Arc::new(pricing),
        }
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(pricing::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
