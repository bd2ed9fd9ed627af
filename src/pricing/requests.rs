//! Request DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Number;

use super::error::PricingError;
use super::models::{
    BackingSelection, DimensionSpec, FrameLayer, GlassSelection, MatLayer, PricingRequest,
};

/// Request to price a framing job.
///
/// Decimal fields accept JSON strings or numbers. `quantity` accepts any JSON
/// number so a fractional quantity is reported as `invalid_quantity` instead
/// of a generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub artwork_width: Decimal,
    pub artwork_height: Decimal,
    #[serde(default)]
    pub mat_layers: Vec<MatLayer>,
    #[serde(default)]
    pub frame_layers: Vec<FrameLayer>,
    #[serde(default)]
    pub glass: Option<GlassSelection>,
    #[serde(default)]
    pub backing: Option<BackingSelection>,
    #[serde(default = "default_quantity")]
    pub quantity: Number,
    #[serde(default)]
    pub special_services: Vec<String>,
    #[serde(default)]
    pub include_wholesale_prices: bool,
}

fn default_quantity() -> Number {
    Number::from(1)
}

impl QuoteRequest {
    pub fn into_pricing_request(self) -> Result<PricingRequest, PricingError> {
        let quantity = parse_quantity(&self.quantity)?;
        Ok(PricingRequest {
            dimensions: DimensionSpec {
                artwork_width: self.artwork_width,
                artwork_height: self.artwork_height,
                mat_layers: self.mat_layers,
                frame_layers: self.frame_layers,
            },
            glass: self.glass,
            backing: self.backing,
            quantity,
            special_services: self.special_services,
            include_wholesale_prices: self.include_wholesale_prices,
        })
    }
}

/// Whole numbers only; sign is checked by the engine.
fn parse_quantity(value: &Number) -> Result<i64, PricingError> {
    if let Some(quantity) = value.as_i64() {
        return Ok(quantity);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(PricingError::InvalidQuantity {
            value: value.to_string(),
        }),
    }
}
