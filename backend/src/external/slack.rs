//! Slack client posting risk alerts to a channel

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared::{Assessment, RiskFactors, RiskLevel};

use crate::error::{AppError, AppResult};

/// Slack Web API client
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    base_url: String,
    bot_token: String,
    channel_id: String,
}

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    blocks: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl SlackClient {
    /// Create a new SlackClient
    pub fn new(base_url: String, bot_token: String, channel_id: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            base_url,
            bot_token,
            channel_id,
        }
    }

    /// Post a formatted risk alert; returns the message timestamp
    pub async fn post_risk_alert(&self, assessment: &Assessment) -> AppResult<String> {
        let request = PostMessageRequest {
            channel: &self.channel_id,
            blocks: format_blocks(assessment),
        };

        let response = self
            .client
            .post(format!("{}/chat.postMessage", self.base_url))
            .bearer_auth(&self.bot_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::SlackApiError(format!("request failed: {}", e)))?;

        let data: PostMessageResponse = response
            .json()
            .await
            .map_err(|e| AppError::SlackApiError(format!("failed to parse response: {}", e)))?;

        if !data.ok {
            return Err(AppError::SlackApiError(
                data.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(data.ts.unwrap_or_default())
    }
}

fn risk_emoji(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "🟢",
        RiskLevel::Medium => "🟡",
        RiskLevel::High => "🔴",
    }
}

fn factor_warnings(factors: &RiskFactors) -> Vec<&'static str> {
    let mut warnings = Vec::new();
    if factors.temperature_out_of_range {
        warnings.push("Temperature out of range");
    }
    if factors.exceeds_humidity_threshold {
        warnings.push("High humidity");
    }
    if factors.exceeds_rain_threshold {
        warnings.push("High rain probability");
    }
    if factors.exceeds_wind_threshold {
        warnings.push("High wind speed");
    }
    warnings
}

/// Block Kit layout for a risk alert
fn format_blocks(assessment: &Assessment) -> Vec<Value> {
    let mut blocks = vec![
        json!({
            "type": "header",
            "text": {
                "type": "plain_text",
                "text": format!("{} Concrete Pour Risk Alert", risk_emoji(assessment.risk_level)),
            }
        }),
        json!({
            "type": "section",
            "fields": [
                { "type": "mrkdwn", "text": format!("*Site:* {}", assessment.site_address) },
                { "type": "mrkdwn", "text": format!("*Date:* {}", assessment.date) },
                { "type": "mrkdwn", "text": format!("*Risk Level:* {}", assessment.risk_level) },
            ]
        }),
        json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!("*Analysis:*\n{}", assessment.narrative),
            }
        }),
    ];

    let warnings = factor_warnings(&assessment.risk_factors);
    if !warnings.is_empty() {
        let lines: Vec<String> = warnings.iter().map(|w| format!("⚠️ {}", w)).collect();
        blocks.push(json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!("*Risk Factors:*\n{}", lines.join("\n")),
            }
        }));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use shared::{AggregatedWeather, Coordinates};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn assessment(level: RiskLevel, factors: RiskFactors) -> Assessment {
        Assessment::assemble(
            "12 Harbour Road, Rotterdam",
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            Coordinates::new(dec("51.9225"), dec("4.47917")),
            AggregatedWeather {
                temperature_celsius: dec("22.0"),
                humidity_percent: 65,
                rain_probability_percent: 20,
                wind_speed_kmh: dec("15.0"),
            },
            factors,
            level,
            "Conditions summary.",
        )
    }

    #[test]
    fn test_low_risk_alert_has_no_factor_block() {
        let blocks = format_blocks(&assessment(RiskLevel::Low, RiskFactors::default()));
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0]["text"]["text"]
            .as_str()
            .unwrap()
            .contains("🟢 Concrete Pour Risk Alert"));
    }

    #[test]
    fn test_high_risk_alert_lists_active_factors() {
        let factors = RiskFactors {
            exceeds_rain_threshold: true,
            exceeds_wind_threshold: true,
            ..RiskFactors::default()
        };
        let blocks = format_blocks(&assessment(RiskLevel::High, factors));

        assert_eq!(blocks.len(), 4);
        let text = blocks[3]["text"]["text"].as_str().unwrap();
        assert!(text.contains("High rain probability"));
        assert!(text.contains("High wind speed"));
        assert!(!text.contains("High humidity"));
    }
}
