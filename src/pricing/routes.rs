//! Pricing API routes.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::config::PricingConfig;
use super::quote::PricingEngine;
use super::requests::QuoteRequest;
use super::responses::{ConfigReloadResponse, QuoteResponse, SpecialServiceResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/quote", post(quote))
        .route("/api/pricing/special-services", get(special_services))
        .route("/api/pricing/config", get(current_config))
        .route("/api/pricing/config/reload", post(reload_config))
}

/// Price a framing job against the live configuration snapshot
async fn quote(
    State(state): State<AppState>,
    Json(body): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let request = body.into_pricing_request()?;
    let engine = PricingEngine::new(state.pricing.snapshot());
    let result = engine.quote(&request)?;
    Ok(Json(QuoteResponse::from(&result)))
}

async fn special_services(State(state): State<AppState>) -> Json<Vec<SpecialServiceResponse>> {
    Json(SpecialServiceResponse::list(&state.pricing.snapshot()))
}

async fn current_config(State(state): State<AppState>) -> Json<PricingConfig> {
    Json(state.pricing.snapshot().as_ref().clone())
}

/// Re-read the configuration file; the old snapshot stays live on failure
async fn reload_config(State(state): State<AppState>) -> Result<Json<ConfigReloadResponse>> {
    let config = state.pricing.reload()?;
    Ok(Json(ConfigReloadResponse {
        version: config.version.clone(),
        special_services: config.special_services.len(),
    }))
}
