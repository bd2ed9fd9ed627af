//! Framing price quotation engine.
//!
//! Pure pricing calculations for custom framing jobs: geometry, tiered
//! markups, material and labor costs, special services and the aggregated
//! quote. The HTTP layer in `routes` is a thin shell over `PricingEngine`.

pub mod calculators;
pub mod config;
pub mod error;
pub mod geometry;
pub mod labor;
pub mod models;
pub mod quote;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod special_services;
pub mod tiers;

// Re-export commonly used items
pub use calculators::round_money;
pub use config::PricingConfig;
pub use error::PricingError;
pub use geometry::{resolve_geometry, ResolvedGeometry};
pub use models::{PricingRequest, PricingResult};
pub use quote::PricingEngine;
pub use routes::router;
pub use tiers::TierTable;
