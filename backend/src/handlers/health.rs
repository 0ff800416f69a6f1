//! Health check and fallback handlers

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::RiskThresholds;

use crate::error::ErrorResponse;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
    pub version: String,
    pub environment: String,
    pub thresholds: RiskThresholds,
    pub timestamp: DateTime<Utc>,
}

/// Liveness and configuration summary
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        status: "Concrete Pour Risk Assessment API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        thresholds: state.assessment.thresholds().clone(),
        timestamp: Utc::now(),
    })
}

/// JSON 404 for unknown routes
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            success: false,
            error: "Route not found".to_string(),
        }),
    )
}
