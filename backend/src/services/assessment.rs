//! Risk assessment pipeline orchestration
//!
//! One pipeline runs per request: geocode, fetch the day window,
//! aggregate, classify, compose the narrative, assemble the record, then
//! fan out. Concurrent requests are independent; the only shared state is
//! the read-only configuration loaded at startup.

use std::time::Duration;

use chrono::NaiveDate;
use shared::{aggregate_day, classify, Assessment, RiskBands, RiskThresholds};

use crate::config::Config;
use crate::error::AppResult;
use crate::external::{ChatClient, GeocodingClient, SheetsClient, SlackClient, WeatherClient};
use crate::services::dispatch::{AssessmentDispatcher, DispatchReport};
use crate::services::narrative::{NarrativeComposer, NarrativeContext};

/// Orchestrates the full assessment pipeline
#[derive(Clone)]
pub struct AssessmentService {
    geocoder: GeocodingClient,
    weather: WeatherClient,
    narrative: NarrativeComposer,
    dispatcher: AssessmentDispatcher,
    thresholds: RiskThresholds,
    bands: RiskBands,
}

impl AssessmentService {
    /// Build all pipeline collaborators from the loaded configuration.
    /// Channels without credentials stay unconfigured and report failed
    /// dispatches rather than blocking startup.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let geocoder = GeocodingClient::new(
            config.geocoding.base_url.clone(),
            &config.geocoding.user_agent,
            Duration::from_secs(config.geocoding.timeout_secs),
        );
        let weather = WeatherClient::new(
            config.weather.base_url.clone(),
            Duration::from_secs(config.weather.timeout_secs),
        );

        let chat = config.narrative.api_key.as_ref().map(|key| {
            ChatClient::new(
                key.clone(),
                config.narrative.base_url.clone(),
                config.narrative.model.clone(),
                config.narrative.max_tokens,
                config.narrative.temperature,
                Duration::from_secs(config.narrative.timeout_secs),
            )
        });
        let narrative =
            NarrativeComposer::new(chat, Duration::from_secs(config.narrative.timeout_secs));

        let slack = match (&config.slack.bot_token, &config.slack.channel_id) {
            (Some(token), Some(channel)) => Some(SlackClient::new(
                config.slack.base_url.clone(),
                token.clone(),
                channel.clone(),
                Duration::from_secs(config.slack.timeout_secs),
            )),
            _ => None,
        };
        let sheets = match (
            &config.sheets.client_email,
            &config.sheets.private_key,
            &config.sheets.sheet_id,
        ) {
            (Some(email), Some(key), Some(id)) => Some(SheetsClient::new(
                email.clone(),
                key.clone(),
                id.clone(),
                Duration::from_secs(config.sheets.timeout_secs),
            )),
            _ => None,
        };
        let dispatcher = AssessmentDispatcher::new(slack, sheets);

        Ok(Self {
            geocoder,
            weather,
            narrative,
            dispatcher,
            thresholds: config.risk_thresholds()?,
            bands: config.risk_bands(),
        })
    }

    /// Run the pipeline for one site and pour date.
    ///
    /// Any failure before assembly aborts the request; nothing is
    /// dispatched and no partial record exists. After assembly, dispatch
    /// outcomes are tagged per channel and never fail the request.
    pub async fn assess(
        &self,
        site_address: &str,
        date: NaiveDate,
    ) -> AppResult<(Assessment, DispatchReport)> {
        tracing::info!("Resolving coordinates for {}", site_address);
        let coordinates = self.geocoder.geocode(site_address).await?;

        tracing::info!(
            "Fetching forecast for {}, {} on {}",
            coordinates.latitude,
            coordinates.longitude,
            date
        );
        let samples = self
            .weather
            .fetch_day(coordinates.latitude, coordinates.longitude, date)
            .await?;

        let weather = aggregate_day(&samples)?;
        let (factors, level) = classify(&weather, &self.thresholds, &self.bands);
        tracing::info!(
            "Classified {} risk with {} active factor(s)",
            level,
            factors.active_count()
        );

        let narrative = self
            .narrative
            .compose(&NarrativeContext {
                site_address,
                date,
                weather: &weather,
                factors: &factors,
                level,
            })
            .await;

        let assessment = Assessment::assemble(
            site_address,
            date,
            coordinates,
            weather,
            factors,
            level,
            narrative,
        );

        let report = self.dispatcher.dispatch(&assessment).await;

        Ok((assessment, report))
    }

    /// Threshold configuration in effect, echoed by the health endpoint
    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// One-time startup tasks for downstream channels
    pub async fn prepare(&self) {
        self.dispatcher.prepare().await;
    }
}
