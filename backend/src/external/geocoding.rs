//! Geocoding client resolving site addresses to coordinates
//!
//! Integrates with the OpenStreetMap Nominatim search API.

use std::str::FromStr;
use std::time::Duration;

use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::Coordinates;

use crate::error::{AppError, AppResult};

/// Nominatim geocoding client
#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

/// One Nominatim search result; coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

impl GeocodingClient {
    /// Create a new GeocodingClient. Nominatim requires an identifying
    /// User-Agent on every request.
    pub fn new(base_url: String, user_agent: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { client, base_url }
    }

    /// Resolve an address to coordinates; the first match wins
    pub async fn geocode(&self, address: &str) -> AppResult<Coordinates> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| AppError::GeocodingFailed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::GeocodingFailed(format!("{} - {}", status, body)));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| AppError::GeocodingFailed(format!("failed to parse response: {}", e)))?;

        let hit = results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::AddressNotFound(address.to_string()))?;

        let latitude = Decimal::from_str(&hit.lat)
            .map_err(|e| AppError::GeocodingFailed(format!("invalid latitude '{}': {}", hit.lat, e)))?;
        let longitude = Decimal::from_str(&hit.lon)
            .map_err(|e| AppError::GeocodingFailed(format!("invalid longitude '{}': {}", hit.lon, e)))?;

        Ok(Coordinates {
            latitude,
            longitude,
            display_name: hit.display_name,
        })
    }
}
