//! HTTP handler for the risk assessment endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shared::{parse_pour_date, validate_site_address, Assessment};

use crate::error::{AppError, AppResult};
use crate::services::DispatchReport;
use crate::AppState;

/// Request body for a risk assessment
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessRequest {
    pub site_address: String,
    /// ISO calendar date; parsed by hand so malformed input maps to the
    /// standard validation response instead of an extractor rejection
    pub date: String,
}

/// Successful assessment response
#[derive(Debug, Serialize)]
pub struct AssessResponse {
    pub success: bool,
    pub assessment: Assessment,
    pub notifications: DispatchReport,
}

/// Run the full assessment pipeline for a site and pour date
pub async fn assess_risk(
    State(state): State<AppState>,
    Json(input): Json<AssessRequest>,
) -> AppResult<Json<AssessResponse>> {
    validate_site_address(&input.site_address)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let date = parse_pour_date(&input.date).map_err(|e| AppError::Validation(e.to_string()))?;

    let (assessment, notifications) = state
        .assessment
        .assess(input.site_address.trim(), date)
        .await?;

    Ok(Json(AssessResponse {
        success: true,
        assessment,
        notifications,
    }))
}
