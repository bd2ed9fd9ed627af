//! Validation errors raised by the quotation engine.

use super::models::{MaterialKind, MAX_QUANTITY};

/// Pricing validation error.
///
/// Every variant is raised before any computation happens, so a caller never
/// sees a partially priced quote.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid dimensions for {field}: {reason}")]
    InvalidDimensions { field: String, reason: String },

    #[error("Invalid quantity {value}: must be a whole number from 1 to {}", MAX_QUANTITY)]
    InvalidQuantity { value: String },

    #[error("Unknown special service '{id}'")]
    UnknownSpecialService { id: String },

    #[error("No wholesale unit price supplied for {}", unit_price_field(.material, .layer))]
    MissingUnitPrice {
        material: MaterialKind,
        layer: Option<usize>,
    },

    #[error("Invalid unit price for {}: {reason}", unit_price_field(.material, .layer))]
    InvalidUnitPrice {
        material: MaterialKind,
        layer: Option<usize>,
        reason: String,
    },
}

impl PricingError {
    pub(crate) fn dimension(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::InvalidDimensions {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Stable snake_case tag for API consumers.
    pub fn error_type(&self) -> &'static str {
        match self {
            PricingError::InvalidDimensions { .. } => "invalid_dimensions",
            PricingError::InvalidQuantity { .. } => "invalid_quantity",
            PricingError::UnknownSpecialService { .. } => "unknown_special_service",
            PricingError::MissingUnitPrice { .. } => "missing_unit_price",
            PricingError::InvalidUnitPrice { .. } => "invalid_unit_price",
        }
    }

    /// Name of the request field that failed validation.
    pub fn field(&self) -> String {
        match self {
            PricingError::InvalidDimensions { field, .. } => field.clone(),
            PricingError::InvalidQuantity { .. } => "quantity".to_string(),
            PricingError::UnknownSpecialService { .. } => "special_services".to_string(),
            PricingError::MissingUnitPrice { material, layer }
            | PricingError::InvalidUnitPrice {
                material, layer, ..
            } => unit_price_field(material, layer),
        }
    }
}

fn unit_price_field(material: &MaterialKind, layer: &Option<usize>) -> String {
    match (*material, *layer) {
        (MaterialKind::Frame, Some(i)) => format!("frame_layers[{}].unit_price", i),
        (MaterialKind::Mat, Some(i)) => format!("mat_layers[{}].unit_price", i),
        (MaterialKind::Frame, None) => "frame_layers".to_string(),
        (MaterialKind::Mat, None) => "mat_layers".to_string(),
        (MaterialKind::Glass, _) => "glass.unit_price".to_string(),
        (MaterialKind::Backing, _) => "backing.unit_price".to_string(),
    }
}

/// A pricing configuration that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Malformed pricing config: {0}")]
    Malformed(String),

    #[error("Invalid pricing config value {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigValidationError {
    pub(crate) fn value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigValidationError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Dotted path of the offending config value, when one is known.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigValidationError::Malformed(_) => None,
            ConfigValidationError::InvalidValue { field, .. } => Some(field),
        }
    }
}
