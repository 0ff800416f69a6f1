//! Weather API client for fetching hourly forecast data
//!
//! Integrates with the Open-Meteo forecast API. The response carries
//! parallel per-hour arrays in which individual readings may be null and
//! the precipitation series may be missing entirely.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::HourlySample;

use crate::error::{AppError, AppResult};

/// Hourly variables requested for each pour date
const HOURLY_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,precipitation_probability,wind_speed_10m";

/// Open-Meteo forecast client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: HourlySeries,
}

#[derive(Debug, Deserialize)]
struct HourlySeries {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability: Option<Vec<Option<f64>>>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { client, base_url }
    }

    /// Fetch the hourly forecast window for one calendar day
    pub async fn fetch_day(
        &self,
        latitude: Decimal,
        longitude: Decimal,
        date: NaiveDate,
    ) -> AppResult<Vec<HourlySample>> {
        let url = format!("{}/forecast", self.base_url);
        let day = date.format("%Y-%m-%d").to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("start_date", day.clone()),
                ("end_date", day),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherUnavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherUnavailable(format!("{} - {}", status, body)));
        }

        let data: ForecastResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherUnavailable(format!("failed to parse response: {}", e)))?;

        let samples = into_samples(data.hourly)?;
        if samples.is_empty() {
            return Err(AppError::WeatherUnavailable(format!(
                "no hourly data returned for {}",
                date
            )));
        }

        Ok(samples)
    }
}

/// Zip the parallel hourly arrays into per-hour samples
fn into_samples(hourly: HourlySeries) -> AppResult<Vec<HourlySample>> {
    let mut samples = Vec::with_capacity(hourly.time.len());

    for (i, stamp) in hourly.time.iter().enumerate() {
        let timestamp = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M").map_err(|e| {
            AppError::WeatherUnavailable(format!("invalid timestamp '{}': {}", stamp, e))
        })?;

        samples.push(HourlySample {
            timestamp,
            temperature_celsius: reading(&hourly.temperature_2m, i),
            humidity_percent: reading(&hourly.relative_humidity_2m, i),
            precipitation_probability: hourly
                .precipitation_probability
                .as_deref()
                .and_then(|series| reading(series, i)),
            wind_speed_kmh: reading(&hourly.wind_speed_10m, i),
        });
    }

    Ok(samples)
}

/// Read index `i` from a series, treating short series and nulls alike
fn reading(series: &[Option<f64>], i: usize) -> Option<Decimal> {
    series.get(i).copied().flatten().and_then(Decimal::from_f64_retain)
}
