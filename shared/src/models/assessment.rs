//! Finalized pour risk assessment records

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::risk::{RiskFactors, RiskLevel};
use crate::models::weather::AggregatedWeather;
use crate::types::Coordinates;

/// Immutable record of one completed risk assessment.
///
/// Assembled exactly once per request; downstream consumers (notification,
/// spreadsheet log, HTTP response) read it without synchronization because
/// nothing mutates it after assembly.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: Uuid,
    pub site_address: String,
    pub date: NaiveDate,
    pub coordinates: Coordinates,
    pub weather: AggregatedWeather,
    pub risk_factors: RiskFactors,
    pub risk_level: RiskLevel,
    pub narrative: String,
    pub created_at: DateTime<Utc>,
}

impl Assessment {
    /// Build the final record. `created_at` marks assembly time, not
    /// request entry, and is the timestamp the spreadsheet log records.
    /// Field validation is the caller's responsibility.
    pub fn assemble(
        site_address: impl Into<String>,
        date: NaiveDate,
        coordinates: Coordinates,
        weather: AggregatedWeather,
        risk_factors: RiskFactors,
        risk_level: RiskLevel,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            site_address: site_address.into(),
            date,
            coordinates,
            weather,
            risk_factors,
            risk_level,
            narrative: narrative.into(),
            created_at: Utc::now(),
        }
    }
}
