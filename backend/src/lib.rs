//! Concrete Pour Risk Assessment - Backend Server
//!
//! An HTTP service that geocodes a construction site address, fetches the
//! hourly forecast for the pour date, classifies pour risk against
//! configured thresholds, composes a narrative brief and fans the finished
//! assessment out to a Slack channel and a Google Sheets log.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use crate::config::Config;

use crate::services::AssessmentService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub assessment: AssessmentService,
}

impl AppState {
    /// Build the pipeline collaborators once; handlers clone cheap handles
    pub fn new(config: Config) -> Result<Self, error::AppError> {
        let config = Arc::new(config);
        let assessment = AssessmentService::from_config(&config)?;
        Ok(Self { config, assessment })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Concrete Pour Risk Assessment API v1.0"
}
