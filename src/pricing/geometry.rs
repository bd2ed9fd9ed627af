//! Finished-size geometry for a framing job.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::error::PricingError;
use super::models::{DimensionSpec, MAX_DIMENSION, MAX_LAYERS};

const INCHES_PER_FOOT: Decimal = dec!(12);

/// Outer size of the framed piece and the measures derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedGeometry {
    pub finished_width: Decimal,
    pub finished_height: Decimal,
    /// `finished_width + finished_height`; selects every markup tier.
    pub united_inches: Decimal,
    pub perimeter_feet: Decimal,
    /// Square inches.
    pub area: Decimal,
}

impl ResolvedGeometry {
    fn from_outer(width: Decimal, height: Decimal) -> Self {
        let united_inches = width + height;
        Self {
            finished_width: width,
            finished_height: height,
            united_inches,
            perimeter_feet: united_inches * dec!(2) / INCHES_PER_FOOT,
            area: width * height,
        }
    }

    /// Geometry of this rectangle grown by `margin` on every side.
    pub fn expanded(&self, margin: Decimal) -> Self {
        let grow = margin * dec!(2);
        Self::from_outer(self.finished_width + grow, self.finished_height + grow)
    }
}

/// Accept a measurement in `0..=MAX_DIMENSION` inches.
fn check_measure(field: impl Into<String>, value: Decimal) -> Result<(), PricingError> {
    if value < Decimal::ZERO {
        return Err(PricingError::dimension(field, "must not be negative"));
    }
    if value > MAX_DIMENSION {
        return Err(PricingError::dimension(
            field,
            format!("must not exceed {} inches", MAX_DIMENSION),
        ));
    }
    Ok(())
}

/// Resolve finished dimensions from the artwork size and total mat width.
pub fn resolve_geometry(
    artwork_width: Decimal,
    artwork_height: Decimal,
    total_mat_width: Decimal,
) -> Result<ResolvedGeometry, PricingError> {
    check_measure("artwork_width", artwork_width)?;
    check_measure("artwork_height", artwork_height)?;
    check_measure("mat_layers", total_mat_width)?;
    if artwork_width + artwork_height <= Decimal::ZERO {
        return Err(PricingError::dimension(
            "artwork_width",
            "artwork width plus height must be greater than zero",
        ));
    }

    let geometry = ResolvedGeometry::from_outer(artwork_width, artwork_height);
    Ok(geometry.expanded(total_mat_width))
}

/// Check every measurement before anything is priced.
pub fn validate_dimensions(spec: &DimensionSpec) -> Result<(), PricingError> {
    if spec.mat_layers.len() > MAX_LAYERS {
        return Err(PricingError::dimension(
            "mat_layers",
            format!("at most {} layers are supported", MAX_LAYERS),
        ));
    }
    if spec.frame_layers.len() > MAX_LAYERS {
        return Err(PricingError::dimension(
            "frame_layers",
            format!("at most {} layers are supported", MAX_LAYERS),
        ));
    }
    for (index, layer) in spec.mat_layers.iter().enumerate() {
        check_measure(format!("mat_layers[{}].width", index), layer.width)?;
        check_measure(format!("mat_layers[{}].offset", index), layer.offset)?;
    }
    for (index, layer) in spec.frame_layers.iter().enumerate() {
        check_measure(
            format!("frame_layers[{}].distance_from_art", index),
            layer.distance_from_art,
        )?;
    }
    resolve_geometry(spec.artwork_width, spec.artwork_height, spec.total_mat_width()).map(|_| ())
}

/// Outer geometry of each mat layer, innermost first.
///
/// Layer `i` covers the artwork plus the widths of layers `0..=i`.
pub fn mat_layer_geometries(spec: &DimensionSpec) -> Result<Vec<ResolvedGeometry>, PricingError> {
    let artwork = resolve_geometry(spec.artwork_width, spec.artwork_height, Decimal::ZERO)?;
    let mut cumulative = Decimal::ZERO;
    Ok(spec
        .mat_layers
        .iter()
        .map(|layer| {
            cumulative += layer.width;
            artwork.expanded(cumulative)
        })
        .collect())
}
