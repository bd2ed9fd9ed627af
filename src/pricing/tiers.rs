//! Sliding-scale tables keyed on united inches.
//!
//! A `TierTable` is a step function: each tier covers sizes up to and
//! including its `up_to` bound, and sizes past the last bound get the
//! open-ended `above` value. The same table type carries the frame, mat and
//! glass markup curves and the glass handling base price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ConfigValidationError;

/// One step of a tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Inclusive upper bound, in united inches.
    pub up_to: Decimal,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTable {
    pub tiers: Vec<Tier>,
    /// Value for sizes past the last bound.
    pub above: Decimal,
}

impl TierTable {
    /// Build a table from `(up_to, value)` pairs in ascending order.
    pub fn new(tiers: &[(Decimal, Decimal)], above: Decimal) -> Self {
        Self {
            tiers: tiers
                .iter()
                .map(|&(up_to, value)| Tier { up_to, value })
                .collect(),
            above,
        }
    }

    pub fn lookup(&self, united_inches: Decimal) -> Decimal {
        self.tiers
            .iter()
            .find(|tier| united_inches <= tier.up_to)
            .map(|tier| tier.value)
            .unwrap_or(self.above)
    }

    /// Bounds must be positive and strictly increasing; values must lie in
    /// `0..=max_value`. `field` prefixes the path reported on failure.
    pub fn validate_ascending(
        &self,
        field: &str,
        max_value: Decimal,
    ) -> Result<(), ConfigValidationError> {
        let mut previous: Option<Decimal> = None;
        for (index, tier) in self.tiers.iter().enumerate() {
            if tier.up_to <= Decimal::ZERO {
                return Err(ConfigValidationError::value(
                    format!("{}.tiers[{}].up_to", field, index),
                    format!("bound {} must be positive", tier.up_to),
                ));
            }
            if let Some(prev) = previous {
                if tier.up_to <= prev {
                    return Err(ConfigValidationError::value(
                        format!("{}.tiers[{}].up_to", field, index),
                        format!("bound {} does not follow {} in ascending order", tier.up_to, prev),
                    ));
                }
            }
            check_value(format!("{}.tiers[{}].value", field, index), tier.value, max_value)?;
            previous = Some(tier.up_to);
        }
        check_value(format!("{}.above", field), self.above, max_value)
    }

    /// Markup curves additionally need multipliers >= 1 that rise with size.
    pub fn validate_markup(&self, field: &str, max_value: Decimal) -> Result<(), ConfigValidationError> {
        self.validate_ascending(field, max_value)?;
        let values = self
            .tiers
            .iter()
            .enumerate()
            .map(|(index, tier)| (format!("{}.tiers[{}].value", field, index), tier.value))
            .chain(std::iter::once((format!("{}.above", field), self.above)));
        let mut previous: Option<Decimal> = None;
        for (path, value) in values {
            if value < Decimal::ONE {
                return Err(ConfigValidationError::value(
                    path,
                    format!("multiplier {} is below 1", value),
                ));
            }
            if let Some(prev) = previous {
                if value <= prev {
                    return Err(ConfigValidationError::value(
                        path,
                        format!("multiplier {} does not rise above {}", value, prev),
                    ));
                }
            }
            previous = Some(value);
        }
        Ok(())
    }
}

fn check_value(path: String, value: Decimal, max_value: Decimal) -> Result<(), ConfigValidationError> {
    if value < Decimal::ZERO {
        return Err(ConfigValidationError::value(path, format!("{} must not be negative", value)));
    }
    if value > max_value {
        return Err(ConfigValidationError::value(
            path,
            format!("{} exceeds the maximum of {}", value, max_value),
        ));
    }
    Ok(())
}
