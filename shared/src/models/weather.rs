//! Hourly weather samples and day-level aggregation

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One hourly forecast sample. Any metric may be missing for a given hour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlySample {
    pub timestamp: NaiveDateTime,
    pub temperature_celsius: Option<Decimal>,
    pub humidity_percent: Option<Decimal>,
    pub precipitation_probability: Option<Decimal>,
    pub wind_speed_kmh: Option<Decimal>,
}

/// A day's forecast window reduced to one value per metric
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregatedWeather {
    #[serde(rename = "temperature")]
    pub temperature_celsius: Decimal,
    #[serde(rename = "humidity")]
    pub humidity_percent: i32,
    #[serde(rename = "rainProbability")]
    pub rain_probability_percent: i32,
    #[serde(rename = "windSpeed")]
    pub wind_speed_kmh: Decimal,
}

/// A metric had no valid reading across the whole aggregation window
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no valid {metric} readings for the requested day")]
pub struct EmptyWindowError {
    pub metric: &'static str,
}

/// Reduce a day's hourly samples to single-valued metrics.
///
/// Temperature, humidity and wind speed take the arithmetic mean of their
/// non-null readings; rain probability takes the maximum, with a missing
/// series reading as zero. Rounding happens here and nowhere upstream:
/// one decimal for temperature and wind speed, whole percent for humidity
/// and rain probability.
pub fn aggregate_day(samples: &[HourlySample]) -> Result<AggregatedWeather, EmptyWindowError> {
    let temperature = mean(samples.iter().map(|s| s.temperature_celsius), "temperature")?
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    let humidity = mean(samples.iter().map(|s| s.humidity_percent), "humidity")?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let wind_speed = mean(samples.iter().map(|s| s.wind_speed_kmh), "wind speed")?
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    let rain_probability = samples
        .iter()
        .filter_map(|s| s.precipitation_probability)
        .max()
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    Ok(AggregatedWeather {
        temperature_celsius: temperature,
        humidity_percent: humidity.to_i32().unwrap_or(0),
        rain_probability_percent: rain_probability.to_i32().unwrap_or(0),
        wind_speed_kmh: wind_speed,
    })
}

fn mean(
    values: impl Iterator<Item = Option<Decimal>>,
    metric: &'static str,
) -> Result<Decimal, EmptyWindowError> {
    let valid: Vec<Decimal> = values.flatten().collect();
    if valid.is_empty() {
        return Err(EmptyWindowError { metric });
    }
    let sum: Decimal = valid.iter().copied().sum();
    Ok(sum / Decimal::from(valid.len()))
}
