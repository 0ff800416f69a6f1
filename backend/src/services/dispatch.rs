//! Fan-out of finished assessments to the notification and log channels
//!
//! The two dispatches run concurrently and independently; each failure is
//! tagged in the report, never propagated to the request.

use serde::Serialize;
use shared::Assessment;

use crate::external::{SheetsClient, SlackClient};

/// Outcome of one dispatch channel
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStatus {
    Sent,
    Logged,
    Failed,
}

/// Per-channel outcomes reported back to the caller
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DispatchReport {
    pub slack: DispatchStatus,
    pub sheets: DispatchStatus,
}

/// Delivers finished assessments to Slack and the spreadsheet log
#[derive(Clone)]
pub struct AssessmentDispatcher {
    slack: Option<SlackClient>,
    sheets: Option<SheetsClient>,
}

impl AssessmentDispatcher {
    pub fn new(slack: Option<SlackClient>, sheets: Option<SheetsClient>) -> Self {
        Self { slack, sheets }
    }

    /// Run both dispatches concurrently and collect their outcomes
    pub async fn dispatch(&self, assessment: &Assessment) -> DispatchReport {
        let (slack, sheets) = tokio::join!(self.post_alert(assessment), self.log_row(assessment));
        DispatchReport { slack, sheets }
    }

    async fn post_alert(&self, assessment: &Assessment) -> DispatchStatus {
        let client = match &self.slack {
            Some(client) => client,
            None => {
                tracing::debug!("Slack channel not configured, skipping alert");
                return DispatchStatus::Failed;
            }
        };

        match client.post_risk_alert(assessment).await {
            Ok(ts) => {
                tracing::info!("Posted risk alert to Slack (ts {})", ts);
                DispatchStatus::Sent
            }
            Err(e) => {
                tracing::error!("Failed to post risk alert to Slack: {}", e);
                DispatchStatus::Failed
            }
        }
    }

    async fn log_row(&self, assessment: &Assessment) -> DispatchStatus {
        let client = match &self.sheets {
            Some(client) => client,
            None => {
                tracing::debug!("Sheets log not configured, skipping append");
                return DispatchStatus::Failed;
            }
        };

        match client.log_assessment(assessment).await {
            Ok(()) => {
                tracing::info!("Logged assessment {} to Google Sheets", assessment.id);
                DispatchStatus::Logged
            }
            Err(e) => {
                tracing::error!("Failed to log assessment to Google Sheets: {}", e);
                DispatchStatus::Failed
            }
        }
    }

    /// Best-effort startup bootstrap for the spreadsheet header
    pub async fn prepare(&self) {
        if let Some(client) = &self.sheets {
            if let Err(e) = client.ensure_header_row().await {
                tracing::warn!("Could not initialize sheet header: {}", e);
            }
        }
    }
}
