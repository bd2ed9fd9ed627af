//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::config::ConfigError;
use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Pricing(e) => {
                tracing::debug!("Rejected pricing request: {}", e);
                (StatusCode::BAD_REQUEST, PricingErrorResponse::from(e))
            }
            AppError::Config(e) => {
                tracing::warn!("Configuration error: {}", e);
                let field = match e {
                    ConfigError::Invalid(invalid) => invalid.field(),
                    _ => None,
                };
                (
                    StatusCode::BAD_REQUEST,
                    PricingErrorResponse {
                        error_type: "configuration_error".to_string(),
                        message: e.to_string(),
                        details: field.map(|field| serde_json::json!({ "field": field })),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
