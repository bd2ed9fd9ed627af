//! Pricing configuration: tier tables, rates and the special service fee table.
//!
//! A `PricingConfig` is immutable once built. The service loads it from a JSON
//! file and replaces the whole object on reload.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::ConfigValidationError;
use super::models::GlassType;
use super::tiers::TierTable;

/// Cap on every markup, factor and percentage.
pub const MAX_MULTIPLIER: Decimal = dec!(100);
/// Cap on every dollar rate and fee.
pub const MAX_RATE: Decimal = dec!(1000000);
/// Cap on the reference hours of one labor task.
pub const MAX_TASK_HOURS: Decimal = dec!(100);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlassConfig {
    /// Allowance for cutting waste on every sheet.
    pub coverage_factor: Decimal,
    pub type_multipliers: BTreeMap<GlassType, Decimal>,
}

impl GlassConfig {
    pub fn type_multiplier(&self, glass_type: GlassType) -> Decimal {
        self.type_multipliers
            .get(&glass_type)
            .copied()
            .unwrap_or(Decimal::ONE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackingConfig {
    /// Per square inch, used when the selection carries no catalog price.
    pub base_rate: Decimal,
    pub markup_factor: Decimal,
}

/// Labor hours per task at `reference_size` united inches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHours {
    pub frame_assembly: Decimal,
    pub mat_cutting: Decimal,
    pub glass_cutting: Decimal,
    pub fitting: Decimal,
    pub finishing: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborConfig {
    /// Dollars per hour.
    pub base_rate: Decimal,
    /// Per-location adjustment applied on top of the base rate.
    pub regional_factor: Decimal,
    /// United inches of a "standard" job.
    pub reference_size: Decimal,
    pub task_hours: TaskHours,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialServiceFee {
    pub fee: Decimal,
    pub description: String,
}

/// Everything the engine needs besides the request itself.
///
/// `frame_pricing_factor` scales every frame price and is independent from
/// the shape of the frame markup curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub version: String,
    pub frame_markup: TierTable,
    pub mat_markup: TierTable,
    pub glass_markup: TierTable,
    pub glass_base_price: TierTable,
    pub frame_pricing_factor: Decimal,
    pub glass: GlassConfig,
    pub backing: BackingConfig,
    pub labor: LaborConfig,
    pub overhead_percentage: Decimal,
    pub special_services: BTreeMap<String, SpecialServiceFee>,
}

impl PricingConfig {
    pub fn frame_markup(&self, united_inches: Decimal) -> Decimal {
        self.frame_markup.lookup(united_inches)
    }

    pub fn mat_markup(&self, united_inches: Decimal) -> Decimal {
        self.mat_markup.lookup(united_inches)
    }

    pub fn glass_markup(&self, united_inches: Decimal) -> Decimal {
        self.glass_markup.lookup(united_inches)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigValidationError> {
        let config: PricingConfig = serde_json::from_str(json)
            .map_err(|e| ConfigValidationError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would produce nonsense prices.
    ///
    /// The upper caps, with the request limits in `models`, keep the largest
    /// possible quote inside `Decimal`'s range.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.version.trim().is_empty() {
            return Err(ConfigValidationError::value("version", "must not be empty"));
        }
        self.frame_markup.validate_markup("frame_markup", MAX_MULTIPLIER)?;
        self.mat_markup.validate_markup("mat_markup", MAX_MULTIPLIER)?;
        self.glass_markup.validate_markup("glass_markup", MAX_MULTIPLIER)?;
        self.glass_base_price
            .validate_ascending("glass_base_price", MAX_RATE)?;

        let bounded = [
            ("frame_pricing_factor", self.frame_pricing_factor, MAX_MULTIPLIER),
            ("glass.coverage_factor", self.glass.coverage_factor, MAX_MULTIPLIER),
            ("backing.base_rate", self.backing.base_rate, MAX_RATE),
            ("backing.markup_factor", self.backing.markup_factor, MAX_MULTIPLIER),
            ("labor.base_rate", self.labor.base_rate, MAX_RATE),
            ("labor.regional_factor", self.labor.regional_factor, MAX_MULTIPLIER),
            ("labor.task_hours.frame_assembly", self.labor.task_hours.frame_assembly, MAX_TASK_HOURS),
            ("labor.task_hours.mat_cutting", self.labor.task_hours.mat_cutting, MAX_TASK_HOURS),
            ("labor.task_hours.glass_cutting", self.labor.task_hours.glass_cutting, MAX_TASK_HOURS),
            ("labor.task_hours.fitting", self.labor.task_hours.fitting, MAX_TASK_HOURS),
            ("labor.task_hours.finishing", self.labor.task_hours.finishing, MAX_TASK_HOURS),
            ("overhead_percentage", self.overhead_percentage, MAX_MULTIPLIER),
        ];
        for (field, value, max) in bounded {
            check_range(field.to_string(), value, Decimal::ZERO, max)?;
        }
        if self.labor.reference_size < Decimal::ONE {
            return Err(ConfigValidationError::value(
                "labor.reference_size",
                "must be at least 1",
            ));
        }
        for (glass_type, multiplier) in &self.glass.type_multipliers {
            check_range(
                format!("glass.type_multipliers.{}", glass_type),
                *multiplier,
                Decimal::ONE,
                MAX_MULTIPLIER,
            )?;
        }
        for (id, service) in &self.special_services {
            if id.trim().is_empty() {
                return Err(ConfigValidationError::value(
                    "special_services",
                    "service id must not be empty",
                ));
            }
            check_range(format!("special_services.{}.fee", id), service.fee, Decimal::ZERO, MAX_RATE)?;
        }
        Ok(())
    }
}

fn check_range(
    field: String,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<(), ConfigValidationError> {
    if value < min || value > max {
        return Err(ConfigValidationError::value(
            field,
            format!("{} is outside {}..={}", value, min, max),
        ));
    }
    Ok(())
}

impl Default for PricingConfig {
    fn default() -> Self {
        let tiers = |values: [Decimal; 5]| {
            TierTable::new(
                &[
                    (dec!(20), values[0]),
                    (dec!(40), values[1]),
                    (dec!(60), values[2]),
                    (dec!(80), values[3]),
                ],
                values[4],
            )
        };

        let special_services = [
            ("float_mount", dec!(35.00), "Float mounting"),
            ("shadow_box", dec!(45.00), "Shadow box build-out"),
            ("rush", dec!(25.00), "Rush processing"),
            ("canvas_stretching", dec!(30.00), "Canvas stretching"),
            ("dry_mount", dec!(20.00), "Dry mounting"),
        ]
        .into_iter()
        .map(|(id, fee, description)| {
            (
                id.to_string(),
                SpecialServiceFee {
                    fee,
                    description: description.to_string(),
                },
            )
        })
        .collect();

        Self {
            version: "2024.1".to_string(),
            frame_markup: tiers([dec!(2.00), dec!(2.25), dec!(2.50), dec!(2.75), dec!(3.00)]),
            mat_markup: tiers([dec!(2.00), dec!(2.50), dec!(3.00), dec!(3.50), dec!(4.00)]),
            glass_markup: tiers([dec!(1.50), dec!(1.75), dec!(2.00), dec!(2.25), dec!(2.50)]),
            glass_base_price: TierTable::new(&[(dec!(40), dec!(5.00))], dec!(10.00)),
            frame_pricing_factor: dec!(1.0),
            glass: GlassConfig {
                coverage_factor: dec!(1.10),
                type_multipliers: BTreeMap::from([
                    (GlassType::Regular, dec!(1.0)),
                    (GlassType::Conservation, dec!(1.5)),
                    (GlassType::Museum, dec!(2.0)),
                ]),
            },
            backing: BackingConfig {
                base_rate: dec!(0.02),
                markup_factor: dec!(2.0),
            },
            labor: LaborConfig {
                base_rate: dec!(35.00),
                regional_factor: dec!(1.0),
                reference_size: dec!(40),
                task_hours: TaskHours {
                    frame_assembly: dec!(0.25),
                    mat_cutting: dec!(0.20),
                    glass_cutting: dec!(0.10),
                    fitting: dec!(0.25),
                    finishing: dec!(0.10),
                },
            },
            overhead_percentage: dec!(0.30),
            special_services,
        }
    }
}
