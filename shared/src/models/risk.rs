//! Risk thresholds, factor evaluation and level classification

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::weather::AggregatedWeather;

/// Threshold configuration for pour risk evaluation.
///
/// Values are already in °C, % and km/h; the classifier performs no unit
/// conversion. Loaded once at startup and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RiskThresholds {
    pub min_temperature: Decimal,
    pub max_temperature: Decimal,
    pub humidity_percent: Decimal,
    pub rain_probability_percent: Decimal,
    pub wind_speed_kmh: Decimal,
}

/// Factor-count boundaries between the ordinal risk levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskBands {
    /// Minimum count of active factors classified as medium risk
    pub medium_at: u32,
    /// Minimum count of active factors classified as high risk
    pub high_at: u32,
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            medium_at: 1,
            high_at: 2,
        }
    }
}

impl RiskBands {
    pub fn level_for(&self, active_factors: u32) -> RiskLevel {
        if active_factors >= self.high_at {
            RiskLevel::High
        } else if active_factors >= self.medium_at {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Boolean risk signals derived from aggregated weather
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactors {
    pub temperature_out_of_range: bool,
    pub exceeds_humidity_threshold: bool,
    pub exceeds_rain_threshold: bool,
    pub exceeds_wind_threshold: bool,
}

impl RiskFactors {
    /// Evaluate each factor against its threshold.
    ///
    /// At-threshold values do not flag; only strict breaches do.
    /// Temperature is in range when `min <= t <= max` inclusive.
    pub fn evaluate(weather: &AggregatedWeather, thresholds: &RiskThresholds) -> Self {
        Self {
            temperature_out_of_range: weather.temperature_celsius < thresholds.min_temperature
                || weather.temperature_celsius > thresholds.max_temperature,
            exceeds_humidity_threshold: Decimal::from(weather.humidity_percent)
                > thresholds.humidity_percent,
            exceeds_rain_threshold: Decimal::from(weather.rain_probability_percent)
                > thresholds.rain_probability_percent,
            exceeds_wind_threshold: weather.wind_speed_kmh > thresholds.wind_speed_kmh,
        }
    }

    /// Number of active factors
    pub fn active_count(&self) -> u32 {
        [
            self.temperature_out_of_range,
            self.exceeds_humidity_threshold,
            self.exceeds_rain_threshold,
            self.exceeds_wind_threshold,
        ]
        .iter()
        .filter(|active| **active)
        .count() as u32
    }

    /// Names of the active factors, always in temperature, humidity,
    /// rain, wind order
    pub fn active_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.temperature_out_of_range {
            labels.push("temperature");
        }
        if self.exceeds_humidity_threshold {
            labels.push("humidity");
        }
        if self.exceeds_rain_threshold {
            labels.push("rain");
        }
        if self.exceeds_wind_threshold {
            labels.push("wind");
        }
        labels
    }
}

/// Ordinal pour risk classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Classify aggregated weather into a factor vector and an ordinal level.
///
/// Pure and deterministic: identical inputs always produce identical output.
pub fn classify(
    weather: &AggregatedWeather,
    thresholds: &RiskThresholds,
    bands: &RiskBands,
) -> (RiskFactors, RiskLevel) {
    let factors = RiskFactors::evaluate(weather, thresholds);
    let level = bands.level_for(factors.active_count());
    (factors, level)
}
