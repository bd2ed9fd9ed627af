//! Quotation aggregator.
//!
//! Validates a `PricingRequest`, runs the geometry, material, labor and
//! special service steps, and assembles the immutable `PricingResult`.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use super::calculators;
use super::config::PricingConfig;
use super::error::PricingError;
use super::geometry::{self, ResolvedGeometry};
use super::labor::{estimate_labor, labor_cost};
use super::models::{
    AppliedMarkups, GlassType, LaborBreakdown, MaterialKind, PricingRequest, PricingResult,
    Profitability, WholesalePrices, MAX_QUANTITY,
};
use super::special_services::price_special_services;

/// Unit prices pulled out of a request once validation has passed.
struct CheckedPrices {
    frames: Vec<Decimal>,
    mats: Vec<Decimal>,
    glass: Option<(GlassType, Decimal)>,
    backing: Option<Decimal>,
}

/// Stateless pricing engine bound to one configuration snapshot.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: Arc<PricingConfig>,
}

impl PricingEngine {
    /// `config` is expected to have passed [`PricingConfig::validate`]; the
    /// request limits only bound the arithmetic together with its caps.
    pub fn new(config: Arc<PricingConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn quote(&self, request: &PricingRequest) -> Result<PricingResult, PricingError> {
        let config = self.config.as_ref();

        // 1. Validate everything up front
        let prices = self.validate(request)?;
        let (special_services, special_services_total) =
            price_special_services(&request.special_services, &config.special_services)?;

        // 2. Geometry
        let dims = &request.dimensions;
        let geometry =
            geometry::resolve_geometry(dims.artwork_width, dims.artwork_height, dims.total_mat_width())?;
        let mat_layers = geometry::mat_layer_geometries(dims)?;
        let frame_layers: Vec<ResolvedGeometry> = dims
            .frame_layers
            .iter()
            .map(|layer| geometry.expanded(layer.distance_from_art))
            .collect();

        // 3. Materials
        let frame_price: Decimal = frame_layers
            .iter()
            .zip(&prices.frames)
            .map(|(layer, unit)| calculators::frame_price(config, layer, *unit))
            .sum();
        let mat_price: Decimal = mat_layers
            .iter()
            .zip(&prices.mats)
            .map(|(layer, unit)| calculators::mat_price(config, layer, *unit))
            .sum();
        let glass_price = prices
            .glass
            .map(|(glass_type, unit)| calculators::glass_price(config, &geometry, glass_type, unit))
            .unwrap_or(Decimal::ZERO);
        let backing_price = prices
            .backing
            .map(|rate| calculators::backing_price(config, &geometry, rate))
            .unwrap_or(Decimal::ZERO);

        // 4. Labor
        let hours = estimate_labor(
            !prices.frames.is_empty(),
            !prices.mats.is_empty(),
            prices.glass.is_some(),
            geometry.united_inches,
            &config.labor,
        );
        let labor = labor_cost(&hours, config.labor.base_rate, config.labor.regional_factor);

        // 5-6. Totals
        let material_cost = frame_price + mat_price + glass_price + backing_price;
        let subtotal = material_cost + labor + special_services_total;
        let total_price = subtotal * Decimal::from(request.quantity);

        // 7. Optional wholesale report
        let (wholesale_prices, profitability) = if request.include_wholesale_prices {
            let wholesale = WholesalePrices {
                frame: frame_layers
                    .iter()
                    .zip(&prices.frames)
                    .map(|(layer, unit)| calculators::frame_wholesale(layer, *unit))
                    .sum(),
                mat: mat_layers
                    .iter()
                    .zip(&prices.mats)
                    .map(|(layer, unit)| calculators::mat_wholesale(layer, *unit))
                    .sum(),
                glass: prices
                    .glass
                    .map(|(_, unit)| calculators::glass_wholesale(&geometry, unit))
                    .unwrap_or(Decimal::ZERO),
                backing: prices
                    .backing
                    .map(|rate| calculators::backing_wholesale(&geometry, rate))
                    .unwrap_or(Decimal::ZERO),
            };
            let report = profitability_report(&wholesale, subtotal, labor, config.overhead_percentage);
            (Some(wholesale), Some(report))
        } else {
            (None, None)
        };

        debug!(
            united_inches = %geometry.united_inches,
            subtotal = %subtotal,
            total_price = %total_price,
            quantity = request.quantity,
            "Priced framing quote"
        );

        Ok(PricingResult {
            geometry,
            frame_price,
            mat_price,
            glass_price,
            backing_price,
            material_cost,
            labor_cost: labor,
            special_services,
            special_services_total,
            subtotal,
            quantity: request.quantity,
            total_price,
            markups: AppliedMarkups {
                frame: config.frame_markup(geometry.united_inches),
                mat: config.mat_markup(geometry.united_inches),
                glass: config.glass_markup(geometry.united_inches),
            },
            labor_rates: LaborBreakdown {
                base_rate: config.labor.base_rate,
                regional_factor: config.labor.regional_factor,
                hours,
                total_hours: hours.total(),
            },
            wholesale_prices,
            profitability,
            config_version: config.version.clone(),
        })
    }

    fn validate(&self, request: &PricingRequest) -> Result<CheckedPrices, PricingError> {
        if request.quantity <= 0 || request.quantity > MAX_QUANTITY {
            return Err(PricingError::InvalidQuantity {
                value: request.quantity.to_string(),
            });
        }
        geometry::validate_dimensions(&request.dimensions)?;

        let frames = request
            .dimensions
            .frame_layers
            .iter()
            .enumerate()
            .map(|(index, layer)| {
                layer
                    .unit_price
                    .ok_or(PricingError::MissingUnitPrice {
                        material: MaterialKind::Frame,
                        layer: Some(index),
                    })?
                    .checked(MaterialKind::Frame, Some(index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mats = request
            .dimensions
            .mat_layers
            .iter()
            .enumerate()
            .map(|(index, layer)| {
                layer
                    .unit_price
                    .ok_or(PricingError::MissingUnitPrice {
                        material: MaterialKind::Mat,
                        layer: Some(index),
                    })?
                    .checked(MaterialKind::Mat, Some(index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let glass = match &request.glass {
            Some(selection) => {
                let unit = selection
                    .unit_price
                    .ok_or(PricingError::MissingUnitPrice {
                        material: MaterialKind::Glass,
                        layer: None,
                    })?
                    .checked(MaterialKind::Glass, None)?;
                Some((selection.glass_type, unit))
            }
            None => None,
        };

        let backing = match &request.backing {
            Some(selection) => Some(match selection.unit_price {
                Some(price) => price.checked(MaterialKind::Backing, None)?,
                None => self.config.backing.base_rate,
            }),
            None => None,
        };

        Ok(CheckedPrices {
            frames,
            mats,
            glass,
            backing,
        })
    }
}

fn profitability_report(
    wholesale: &WholesalePrices,
    subtotal: Decimal,
    labor_cost: Decimal,
    overhead_percentage: Decimal,
) -> Profitability {
    let total_wholesale_cost = wholesale.total();
    let overhead_cost = total_wholesale_cost * overhead_percentage;
    let gross_profit = subtotal - (total_wholesale_cost + overhead_cost + labor_cost);

    Profitability {
        total_wholesale_cost,
        overhead_cost,
        gross_profit,
        gross_profit_margin: gross_profit.checked_div(subtotal),
        markup_multiplier: subtotal.checked_div(total_wholesale_cost),
    }
}
