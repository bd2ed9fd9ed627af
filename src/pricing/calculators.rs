//! Core pricing calculation functions.
//!
//! Pure functions for material pricing math - no I/O, no shared state.
//! Every calculator takes the configuration, the geometry it prices and the
//! wholesale unit price, and returns a full-precision `Decimal`.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::config::PricingConfig;
use super::geometry::ResolvedGeometry;
use super::models::GlassType;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Only used when a quote leaves the engine; everything inside the engine
/// keeps full precision.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use frameshop_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Retail price of one frame layer.
///
/// `unit_price` is per linear foot; the tier multiplier and the global
/// pricing factor are applied separately.
pub fn frame_price(config: &PricingConfig, layer: &ResolvedGeometry, unit_price: Decimal) -> Decimal {
    unit_price
        * layer.perimeter_feet
        * config.frame_markup(layer.united_inches)
        * config.frame_pricing_factor
}

pub fn frame_wholesale(layer: &ResolvedGeometry, unit_price: Decimal) -> Decimal {
    unit_price * layer.perimeter_feet
}

/// Retail price of one mat layer, priced on the layer's own outer size.
pub fn mat_price(config: &PricingConfig, layer: &ResolvedGeometry, unit_price: Decimal) -> Decimal {
    layer.area * unit_price * config.mat_markup(layer.united_inches)
}

pub fn mat_wholesale(layer: &ResolvedGeometry, unit_price: Decimal) -> Decimal {
    layer.area * unit_price
}

/// Retail glass price: a size-bracket handling charge plus the marked-up
/// sheet cost. `unit_price` is per square inch.
pub fn glass_price(
    config: &PricingConfig,
    geometry: &ResolvedGeometry,
    glass_type: GlassType,
    unit_price: Decimal,
) -> Decimal {
    let base = config.glass_base_price.lookup(geometry.united_inches);
    base + geometry.area
        * unit_price
        * config.glass_markup(geometry.united_inches)
        * config.glass.coverage_factor
        * config.glass.type_multiplier(glass_type)
}

pub fn glass_wholesale(geometry: &ResolvedGeometry, unit_price: Decimal) -> Decimal {
    geometry.area * unit_price
}

/// Backing board has no tiers: area times rate times a flat markup.
pub fn backing_price(config: &PricingConfig, geometry: &ResolvedGeometry, base_rate: Decimal) -> Decimal {
    geometry.area * base_rate * config.backing.markup_factor
}

pub fn backing_wholesale(geometry: &ResolvedGeometry, base_rate: Decimal) -> Decimal {
    geometry.area * base_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::geometry::resolve_geometry;
    use rust_decimal_macros::dec;

    fn example_geometry() -> ResolvedGeometry {
        resolve_geometry(dec!(16), dec!(20), dec!(2)).unwrap()
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.125), 2), dec!(2.12));
        assert_eq!(round_money(dec!(2.135), 2), dec!(2.14));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(146.6666666666), 2), dec!(146.67));
    }

    // ==================== frame tests ====================

    #[test]
    fn test_frame_price_uses_perimeter_and_tier() {
        let config = PricingConfig::default();
        let price = frame_price(&config, &example_geometry(), dec!(8.00));
        // 8.00/ft * 88/12 ft * 2.50 (<=60 tier)
        assert_eq!(round_money(price, 2), dec!(146.67));
        assert_eq!(
            round_money(frame_wholesale(&example_geometry(), dec!(8.00)), 2),
            dec!(58.67)
        );
    }

    #[test]
    fn test_frame_pricing_factor_is_independent_of_tiers() {
        let mut config = PricingConfig::default();
        let base = frame_price(&config, &example_geometry(), dec!(8.00));
        config.frame_pricing_factor = dec!(0.5);
        let scaled = frame_price(&config, &example_geometry(), dec!(8.00));
        assert_eq!(round_money(scaled * dec!(2), 8), round_money(base, 8));
    }

    #[test]
    fn test_frame_price_zero_unit_price() {
        let config = PricingConfig::default();
        assert_eq!(frame_price(&config, &example_geometry(), dec!(0)), dec!(0));
    }

    // ==================== mat tests ====================

    #[test]
    fn test_mat_price() {
        let config = PricingConfig::default();
        // 480 sq in * 0.01 * 3.00 (<=60 tier)
        assert_eq!(mat_price(&config, &example_geometry(), dec!(0.01)), dec!(14.40));
        assert_eq!(mat_wholesale(&example_geometry(), dec!(0.01)), dec!(4.80));
    }

    // ==================== glass tests ====================

    #[test]
    fn test_glass_price_regular() {
        let config = PricingConfig::default();
        // $10 base (>40 UI) + 480 * 0.08 * 2.00 * 1.10 * 1.0
        let price = glass_price(&config, &example_geometry(), GlassType::Regular, dec!(0.08));
        assert_eq!(price, dec!(94.48));
        assert_eq!(glass_wholesale(&example_geometry(), dec!(0.08)), dec!(38.40));
    }

    #[test]
    fn test_glass_type_scales_area_component_only() {
        let config = PricingConfig::default();
        let g = example_geometry();
        let museum = glass_price(&config, &g, GlassType::Museum, dec!(0.08));
        let conservation = glass_price(&config, &g, GlassType::Conservation, dec!(0.08));
        assert_eq!(museum, dec!(10) + dec!(84.48) * dec!(2));
        assert_eq!(conservation, dec!(10) + dec!(84.48) * dec!(1.5));
    }

    #[test]
    fn test_glass_small_bracket_base_price() {
        let config = PricingConfig::default();
        let small = resolve_geometry(dec!(8), dec!(10), dec!(0)).unwrap();
        // 18 UI: $5 base + 80 * 0.08 * 1.50 * 1.10
        assert_eq!(
            glass_price(&config, &small, GlassType::Regular, dec!(0.08)),
            dec!(15.56)
        );
    }

    // ==================== backing tests ====================

    #[test]
    fn test_backing_price() {
        let config = PricingConfig::default();
        assert_eq!(backing_price(&config, &example_geometry(), dec!(0.02)), dec!(19.20));
        assert_eq!(backing_wholesale(&example_geometry(), dec!(0.02)), dec!(9.60));
    }
}
