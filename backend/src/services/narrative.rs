//! Narrative brief composition
//!
//! Two-stage composer: the primary path asks the chat completions
//! collaborator for a brief under a bounded timeout; the deterministic
//! template below backs every failure, so a non-empty brief is produced on
//! every call.

use std::time::Duration;

use chrono::NaiveDate;
use shared::{AggregatedWeather, RiskFactors, RiskLevel};
use tokio::time::timeout;

use crate::external::ChatClient;

const SYSTEM_PROMPT: &str = "You are a construction safety expert specializing in concrete \
pouring operations. Provide concise, actionable risk assessments.";

/// Everything the composer needs to describe one assessment
pub struct NarrativeContext<'a> {
    pub site_address: &'a str,
    pub date: NaiveDate,
    pub weather: &'a AggregatedWeather,
    pub factors: &'a RiskFactors,
    pub level: RiskLevel,
}

/// Composes the narrative attached to each assessment
#[derive(Clone)]
pub struct NarrativeComposer {
    client: Option<ChatClient>,
    timeout: Duration,
}

impl NarrativeComposer {
    pub fn new(client: Option<ChatClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Compose a brief for the assessment. Collaborator errors and
    /// timeouts are recovered here and never reach the caller.
    pub async fn compose(&self, ctx: &NarrativeContext<'_>) -> String {
        if let Some(client) = &self.client {
            let prompt = build_prompt(ctx);
            match timeout(self.timeout, client.complete(SYSTEM_PROMPT, &prompt)).await {
                Ok(Ok(brief)) => return brief,
                Ok(Err(e)) => {
                    tracing::warn!("Narrative collaborator failed, using fallback: {}", e);
                }
                Err(_) => {
                    tracing::warn!(
                        "Narrative collaborator timed out after {:?}, using fallback",
                        self.timeout
                    );
                }
            }
        }

        fallback_brief(ctx.level, ctx.factors)
    }
}

fn build_prompt(ctx: &NarrativeContext<'_>) -> String {
    let factor_lines = [
        (
            ctx.factors.temperature_out_of_range,
            "Temperature out of range",
            "Temperature within range",
        ),
        (
            ctx.factors.exceeds_humidity_threshold,
            "High humidity",
            "Normal humidity",
        ),
        (
            ctx.factors.exceeds_rain_threshold,
            "High rain probability",
            "Low rain risk",
        ),
        (
            ctx.factors.exceeds_wind_threshold,
            "High wind speed",
            "Normal wind",
        ),
    ]
    .iter()
    .map(|(active, breached, clear)| format!("- {}", if *active { *breached } else { *clear }))
    .collect::<Vec<_>>()
    .join("\n");

    format!(
        "Generate a Concrete Pour Risk Brief for:\n\
         Location: {}\n\
         Date: {}\n\
         Risk Level: {}\n\n\
         Weather Conditions:\n\
         - Temperature: {}°C\n\
         - Humidity: {}%\n\
         - Rain Probability: {}%\n\
         - Wind Speed: {} km/h\n\n\
         Risk Factors:\n{}\n\n\
         Provide a brief assessment (2-3 sentences) and specific mitigation \
         recommendations if needed.",
        ctx.site_address,
        ctx.date,
        ctx.level,
        ctx.weather.temperature_celsius,
        ctx.weather.humidity_percent,
        ctx.weather.rain_probability_percent,
        ctx.weather.wind_speed_kmh,
        factor_lines,
    )
}

/// Deterministic brief used whenever the collaborator is unavailable.
/// Active factors are always named in temperature, humidity, rain, wind
/// order.
pub fn fallback_brief(level: RiskLevel, factors: &RiskFactors) -> String {
    if level == RiskLevel::Low {
        return "Weather conditions are favorable for concrete pouring. Proceed with normal \
                operations."
            .to_string();
    }

    let labels = factors.active_labels();
    let cause = if labels.is_empty() {
        "prevailing conditions".to_string()
    } else {
        labels.join(", ")
    };

    match level {
        RiskLevel::Medium => format!(
            "MEDIUM risk detected due to {cause}. Implement additional protective measures \
             before pouring."
        ),
        _ => format!(
            "HIGH risk detected due to {cause}. Consider postponing the pour until conditions \
             improve."
        ),
    }
}
