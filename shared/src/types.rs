//! Common types used across the service

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Geographic coordinates resolved from a site address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
    /// Human-readable place name returned by the geocoder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Coordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
            display_name: None,
        }
    }
}
