//! Configuration management for the Pour Risk Assessment service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with PRA_ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{RiskBands, RiskThresholds};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Geocoding API configuration
    pub geocoding: GeocodingConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Generative narrative configuration
    pub narrative: NarrativeConfig,

    /// Slack notification configuration
    pub slack: SlackConfig,

    /// Google Sheets log configuration
    pub sheets: SheetsConfig,

    /// Pour risk thresholds
    pub thresholds: ThresholdConfig,

    /// Risk level band boundaries
    pub risk: RiskBandConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Nominatim-compatible search endpoint
    pub base_url: String,

    /// User-Agent sent with geocoding requests, required by Nominatim
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Open-Meteo-compatible forecast endpoint
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NarrativeConfig {
    /// API key for the chat completions collaborator; the deterministic
    /// fallback composer is used when absent
    pub api_key: Option<String>,

    /// Chat completions endpoint base
    pub base_url: String,

    /// Model identifier
    pub model: String,

    /// Maximum completion tokens requested per brief
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Bound on the single generation attempt, in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SlackConfig {
    /// Slack Web API base
    pub base_url: String,

    /// Bot token; alerts are skipped when absent
    pub bot_token: Option<String>,

    /// Channel receiving risk alerts
    pub channel_id: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SheetsConfig {
    /// Service account email
    pub client_email: Option<String>,

    /// Service account RSA private key in PEM form
    pub private_key: Option<String>,

    /// Target spreadsheet id
    pub sheet_id: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Pour risk thresholds, already in °C, % and km/h
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ThresholdConfig {
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub humidity: f64,
    pub rain_probability: f64,
    pub wind_speed: f64,
}

/// Factor-count boundaries between risk levels
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct RiskBandConfig {
    pub medium_at: u32,
    pub high_at: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("PRA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("geocoding.base_url", "https://nominatim.openstreetmap.org")?
            .set_default("geocoding.user_agent", "ConstructionRiskApp/1.0")?
            .set_default("geocoding.timeout_secs", 10)?
            .set_default("weather.base_url", "https://api.open-meteo.com/v1")?
            .set_default("weather.timeout_secs", 10)?
            .set_default("narrative.base_url", "https://api.openai.com/v1")?
            .set_default("narrative.model", "gpt-3.5-turbo")?
            .set_default("narrative.max_tokens", 300)?
            .set_default("narrative.temperature", 0.3)?
            .set_default("narrative.timeout_secs", 15)?
            .set_default("slack.base_url", "https://slack.com/api")?
            .set_default("slack.timeout_secs", 10)?
            .set_default("sheets.timeout_secs", 15)?
            .set_default("thresholds.min_temperature", 5)?
            .set_default("thresholds.max_temperature", 35)?
            .set_default("thresholds.humidity", 85)?
            .set_default("thresholds.rain_probability", 30)?
            .set_default("thresholds.wind_speed", 25)?
            .set_default("risk.medium_at", 1)?
            .set_default("risk.high_at", 2)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PRA_ prefix)
            .add_source(
                Environment::with_prefix("PRA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Domain thresholds with exact decimal bounds
    pub fn risk_thresholds(&self) -> Result<RiskThresholds, ConfigError> {
        let dec = |name: &str, value: f64| {
            Decimal::try_from(value)
                .map_err(|e| ConfigError::Message(format!("invalid threshold {name}={value}: {e}")))
        };

        Ok(RiskThresholds {
            min_temperature: dec("min_temperature", self.thresholds.min_temperature)?,
            max_temperature: dec("max_temperature", self.thresholds.max_temperature)?,
            humidity_percent: dec("humidity", self.thresholds.humidity)?,
            rain_probability_percent: dec("rain_probability", self.thresholds.rain_probability)?,
            wind_speed_kmh: dec("wind_speed", self.thresholds.wind_speed)?,
        })
    }

    /// Factor-count band boundaries
    pub fn risk_bands(&self) -> RiskBands {
        RiskBands {
            medium_at: self.risk.medium_at,
            high_at: self.risk.high_at,
        }
    }
}
