//! Response DTOs for pricing API endpoints.
//!
//! Money leaves the engine here, rounded to cents with banker's rounding.
//! Nothing upstream of this module rounds.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::round_money;
use super::config::PricingConfig;
use super::error::PricingError;
use super::models::{AppliedService, PricingResult};

/// Cents, always carrying two decimal places on the wire.
fn money(amount: Decimal) -> Decimal {
    let mut rounded = round_money(amount, 2);
    rounded.rescale(2);
    rounded
}

fn ratio(amount: Decimal) -> Decimal {
    round_money(amount, 4)
}

#[derive(Debug, Serialize)]
pub struct DimensionsResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub finished_width: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub finished_height: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub united_inches: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub perimeter_feet: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub area: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ServiceLineResponse {
    pub id: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub fee: Decimal,
}

impl From<&AppliedService> for ServiceLineResponse {
    fn from(service: &AppliedService) -> Self {
        Self {
            id: service.id.clone(),
            description: service.description.clone(),
            fee: money(service.fee),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkupsResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub frame: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mat: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub glass: Decimal,
}

#[derive(Debug, Serialize)]
pub struct LaborHoursResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub frame_assembly: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mat_cutting: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub glass_cutting: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub fitting: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub finishing: Decimal,
}

#[derive(Debug, Serialize)]
pub struct LaborRatesResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub regional_factor: Decimal,
    pub hours: LaborHoursResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_hours: Decimal,
}

/// Wholesale cost per component
#[derive(Debug, Serialize)]
pub struct WholesalePricesResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub frame: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mat: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub glass: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub backing: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ProfitabilityResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub total_wholesale_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub overhead_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub gross_profit: Decimal,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub gross_profit_margin: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub markup_multiplier: Option<Decimal>,
}

/// Response for a framing quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub dimensions: DimensionsResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub frame_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub mat_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub glass_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub backing_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub material_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub labor_cost: Decimal,
    pub special_services: Vec<ServiceLineResponse>,
    #[serde(with = "rust_decimal::serde::str")]
    pub special_services_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    pub markups: MarkupsResponse,
    pub labor_rates: LaborRatesResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wholesale_prices: Option<WholesalePricesResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profitability: Option<ProfitabilityResponse>,
    pub config_version: String,
}

impl From<&PricingResult> for QuoteResponse {
    fn from(result: &PricingResult) -> Self {
        let geometry = &result.geometry;
        let hours = &result.labor_rates.hours;

        Self {
            dimensions: DimensionsResponse {
                finished_width: geometry.finished_width,
                finished_height: geometry.finished_height,
                united_inches: geometry.united_inches,
                perimeter_feet: money(geometry.perimeter_feet),
                area: geometry.area,
            },
            frame_price: money(result.frame_price),
            mat_price: money(result.mat_price),
            glass_price: money(result.glass_price),
            backing_price: money(result.backing_price),
            material_cost: money(result.material_cost),
            labor_cost: money(result.labor_cost),
            special_services: result.special_services.iter().map(Into::into).collect(),
            special_services_total: money(result.special_services_total),
            subtotal: money(result.subtotal),
            quantity: result.quantity,
            total_price: money(result.total_price),
            markups: MarkupsResponse {
                frame: result.markups.frame,
                mat: result.markups.mat,
                glass: result.markups.glass,
            },
            labor_rates: LaborRatesResponse {
                base_rate: money(result.labor_rates.base_rate),
                regional_factor: result.labor_rates.regional_factor,
                hours: LaborHoursResponse {
                    frame_assembly: ratio(hours.frame_assembly),
                    mat_cutting: ratio(hours.mat_cutting),
                    glass_cutting: ratio(hours.glass_cutting),
                    fitting: ratio(hours.fitting),
                    finishing: ratio(hours.finishing),
                },
                total_hours: ratio(result.labor_rates.total_hours),
            },
            wholesale_prices: result.wholesale_prices.map(|w| WholesalePricesResponse {
                frame: money(w.frame),
                mat: money(w.mat),
                glass: money(w.glass),
                backing: money(w.backing),
            }),
            profitability: result.profitability.map(|p| ProfitabilityResponse {
                total_wholesale_cost: money(p.total_wholesale_cost),
                overhead_cost: money(p.overhead_cost),
                gross_profit: money(p.gross_profit),
                gross_profit_margin: p.gross_profit_margin.map(ratio),
                markup_multiplier: p.markup_multiplier.map(ratio),
            }),
            config_version: result.config_version.clone(),
        }
    }
}

/// One row of the special service fee table
#[derive(Debug, Serialize)]
pub struct SpecialServiceResponse {
    pub id: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub fee: Decimal,
}

impl SpecialServiceResponse {
    pub fn list(config: &PricingConfig) -> Vec<Self> {
        config
            .special_services
            .iter()
            .map(|(id, service)| Self {
                id: id.clone(),
                description: service.description.clone(),
                fee: money(service.fee),
            })
            .collect()
    }
}

/// Response after a configuration reload
#[derive(Debug, Serialize)]
pub struct ConfigReloadResponse {
    pub version: String,
    pub special_services: usize,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&PricingError> for PricingErrorResponse {
    fn from(err: &PricingError) -> Self {
        Self {
            error_type: err.error_type().to_string(),
            message: err.to_string(),
            details: Some(serde_json::json!({ "field": err.field() })),
        }
    }
}
