//! Error handling for the Pour Risk Assessment service
//!
//! Every failure that reaches the client uses the wire shape
//! `{"success": false, "error": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Upstream lookup errors
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    #[error("Geocoding service error: {0}")]
    GeocodingFailed(String),

    #[error("Weather service error: {0}")]
    WeatherUnavailable(String),

    #[error("Unusable forecast data: {0}")]
    EmptyForecast(#[from] shared::EmptyWindowError),

    // External collaborator errors. Clients propagate these uniformly;
    // the narrative and dispatch layers recover from them locally.
    #[error("Narrative service error: {0}")]
    NarrativeFailed(String),

    #[error("Slack API error: {0}")]
    SlackApiError(String),

    #[error("Google Sheets error: {0}")]
    SheetsApiError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Configuration(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::AddressNotFound(_)
            | AppError::GeocodingFailed(_)
            | AppError::WeatherUnavailable(_)
            | AppError::EmptyForecast(_)
            | AppError::NarrativeFailed(_)
            | AppError::SlackApiError(_)
            | AppError::SheetsApiError(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
