//! Route definitions for the Pour Risk Assessment service

use axum::{routing::post, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/assess-risk", post(handlers::assess_risk))
}
