//! Domain types for framing quotes.
//!
//! Everything here is plain data: the catalog collaborator builds the inputs,
//! the engine derives a `PricingResult` from them and never mutates either.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::PricingError;
use super::geometry::ResolvedGeometry;

// Request limits. Together with the caps in `PricingConfig::validate` they
// keep every intermediate amount far inside `Decimal`'s range.

/// Largest artwork side, mat width or frame distance, in inches.
pub const MAX_DIMENSION: Decimal = dec!(10000);
/// Most mat or frame layers on one job.
pub const MAX_LAYERS: usize = 32;
/// Largest wholesale unit price accepted from the catalog.
pub const MAX_UNIT_PRICE: Decimal = dec!(1000000);
pub const MAX_QUANTITY: i64 = 1_000_000;

/// Material family a catalog unit price belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    Frame,
    Mat,
    Glass,
    Backing,
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MaterialKind::Frame => "frame",
            MaterialKind::Mat => "mat",
            MaterialKind::Glass => "glass",
            MaterialKind::Backing => "backing",
        };
        f.write_str(label)
    }
}

/// Wholesale unit price from the catalog.
///
/// Frame prices are per linear foot; mat, glass and backing prices are per
/// square inch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogUnitPrice {
    pub kind: MaterialKind,
    pub wholesale_unit_price: Decimal,
}

impl CatalogUnitPrice {
    pub fn new(kind: MaterialKind, wholesale_unit_price: Decimal) -> Self {
        Self {
            kind,
            wholesale_unit_price,
        }
    }

    /// Derive a per-square-inch mat price from a box of mat board.
    ///
    /// Returns `None` when the box holds no sheets or the sheet has no area.
    pub fn from_mat_board(
        box_price: Decimal,
        sheets_per_box: u32,
        sheet_width: Decimal,
        sheet_height: Decimal,
    ) -> Option<Self> {
        let sheet_area = sheet_width * sheet_height;
        if sheets_per_box == 0 || sheet_area <= Decimal::ZERO {
            return None;
        }
        let per_sheet = box_price / Decimal::from(sheets_per_box);
        Some(Self::new(MaterialKind::Mat, per_sheet / sheet_area))
    }

    /// Check the price belongs to `expected` and lies in `0..=MAX_UNIT_PRICE`.
    pub(crate) fn checked(
        &self,
        expected: MaterialKind,
        layer: Option<usize>,
    ) -> Result<Decimal, PricingError> {
        if self.kind != expected {
            return Err(PricingError::InvalidUnitPrice {
                material: expected,
                layer,
                reason: format!("catalog price is for {}, not {}", self.kind, expected),
            });
        }
        if self.wholesale_unit_price < Decimal::ZERO {
            return Err(PricingError::InvalidUnitPrice {
                material: expected,
                layer,
                reason: format!("{} is negative", self.wholesale_unit_price),
            });
        }
        if self.wholesale_unit_price > MAX_UNIT_PRICE {
            return Err(PricingError::InvalidUnitPrice {
                material: expected,
                layer,
                reason: format!(
                    "{} exceeds the maximum of {}",
                    self.wholesale_unit_price, MAX_UNIT_PRICE
                ),
            });
        }
        Ok(self.wholesale_unit_price)
    }
}

/// One mat layer. Index 0 in a stack is the innermost layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatLayer {
    /// Border added on every side, in inches.
    pub width: Decimal,
    /// Visual reveal against the neighbouring layer. Display only.
    #[serde(default)]
    pub offset: Decimal,
    #[serde(default)]
    pub unit_price: Option<CatalogUnitPrice>,
}

/// One frame layer (liner, outer frame, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameLayer {
    /// Distance outward from the edge of the mat stack, in inches.
    #[serde(default)]
    pub distance_from_art: Decimal,
    #[serde(default)]
    pub unit_price: Option<CatalogUnitPrice>,
}

/// Artwork size plus the mat and frame stacks around it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub artwork_width: Decimal,
    pub artwork_height: Decimal,
    #[serde(default)]
    pub mat_layers: Vec<MatLayer>,
    #[serde(default)]
    pub frame_layers: Vec<FrameLayer>,
}

impl DimensionSpec {
    pub fn new(artwork_width: Decimal, artwork_height: Decimal) -> Self {
        Self {
            artwork_width,
            artwork_height,
            ..Self::default()
        }
    }

    pub fn with_mat(mut self, width: Decimal, unit_price: Decimal) -> Self {
        self.mat_layers.push(MatLayer {
            width,
            offset: Decimal::ZERO,
            unit_price: Some(CatalogUnitPrice::new(MaterialKind::Mat, unit_price)),
        });
        self
    }

    pub fn with_frame(mut self, distance_from_art: Decimal, unit_price: Decimal) -> Self {
        self.frame_layers.push(FrameLayer {
            distance_from_art,
            unit_price: Some(CatalogUnitPrice::new(MaterialKind::Frame, unit_price)),
        });
        self
    }

    /// Sum of every mat layer's border width.
    pub fn total_mat_width(&self) -> Decimal {
        self.mat_layers.iter().map(|layer| layer.width).sum()
    }
}

/// Convert a float measurement, rejecting NaN and infinities.
pub fn decimal_from_f64(field: &str, value: f64) -> Result<Decimal, PricingError> {
    if !value.is_finite() {
        return Err(PricingError::dimension(field, "must be a finite number"));
    }
    Decimal::try_from(value)
        .map_err(|e| PricingError::dimension(field, format!("not representable: {}", e)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlassType {
    Regular,
    Conservation,
    Museum,
}

impl fmt::Display for GlassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GlassType::Regular => "regular",
            GlassType::Conservation => "conservation",
            GlassType::Museum => "museum",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlassSelection {
    pub glass_type: GlassType,
    #[serde(default)]
    pub unit_price: Option<CatalogUnitPrice>,
}

/// Backing board. Without a unit price the configured base rate applies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BackingSelection {
    #[serde(default)]
    pub unit_price: Option<CatalogUnitPrice>,
}

/// The top-level call contract of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingRequest {
    pub dimensions: DimensionSpec,
    pub glass: Option<GlassSelection>,
    pub backing: Option<BackingSelection>,
    pub quantity: i64,
    pub special_services: Vec<String>,
    pub include_wholesale_prices: bool,
}

impl PricingRequest {
    pub fn new(dimensions: DimensionSpec) -> Self {
        Self {
            dimensions,
            glass: None,
            backing: None,
            quantity: 1,
            special_services: Vec::new(),
            include_wholesale_prices: false,
        }
    }
}

/// A special service as charged on a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedService {
    pub id: String,
    pub description: String,
    pub fee: Decimal,
}

/// Tier multipliers in effect at the quote's united inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedMarkups {
    pub frame: Decimal,
    pub mat: Decimal,
    pub glass: Decimal,
}

/// Estimated hours per framing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LaborHours {
    pub frame_assembly: Decimal,
    pub mat_cutting: Decimal,
    pub glass_cutting: Decimal,
    pub fitting: Decimal,
    pub finishing: Decimal,
}

impl LaborHours {
    pub fn total(&self) -> Decimal {
        self.frame_assembly + self.mat_cutting + self.glass_cutting + self.fitting + self.finishing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LaborBreakdown {
    pub base_rate: Decimal,
    pub regional_factor: Decimal,
    pub hours: LaborHours,
    pub total_hours: Decimal,
}

/// Shop cost of each component, before any markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WholesalePrices {
    pub frame: Decimal,
    pub mat: Decimal,
    pub glass: Decimal,
    pub backing: Decimal,
}

impl WholesalePrices {
    pub fn total(&self) -> Decimal {
        self.frame + self.mat + self.glass + self.backing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Profitability {
    pub total_wholesale_cost: Decimal,
    pub overhead_cost: Decimal,
    pub gross_profit: Decimal,
    /// `None` when the subtotal is zero.
    pub gross_profit_margin: Option<Decimal>,
    /// `None` when the wholesale cost is zero.
    pub markup_multiplier: Option<Decimal>,
}

/// A fully priced quote. Built once per call and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingResult {
    pub geometry: ResolvedGeometry,
    pub frame_price: Decimal,
    pub mat_price: Decimal,
    pub glass_price: Decimal,
    pub backing_price: Decimal,
    pub material_cost: Decimal,
    pub labor_cost: Decimal,
    pub special_services: Vec<AppliedService>,
    pub special_services_total: Decimal,
    pub subtotal: Decimal,
    pub quantity: i64,
    pub total_price: Decimal,
    pub markups: AppliedMarkups,
    pub labor_rates: LaborBreakdown,
    pub wholesale_prices: Option<WholesalePrices>,
    pub profitability: Option<Profitability>,
    pub config_version: String,
}
