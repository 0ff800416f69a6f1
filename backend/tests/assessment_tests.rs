//! HTTP surface integration tests
//!
//! Drives the full router with stubbed upstream collaborators: a local
//! mock serves geocoder and forecast responses for the success path, and
//! unroutable endpoints exercise the failure paths.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use pra_server::config::{
    Config, GeocodingConfig, NarrativeConfig, RiskBandConfig, ServerConfig, SheetsConfig,
    SlackConfig, ThresholdConfig, WeatherConfig,
};
use pra_server::{create_app, AppState};

/// Endpoint with no listener; connections fail immediately
const UNROUTABLE: &str = "http://127.0.0.1:9";

fn test_config(geocoding_url: &str, weather_url: &str) -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
        },
        geocoding: GeocodingConfig {
            base_url: geocoding_url.to_string(),
            user_agent: "pra-tests/1.0".to_string(),
            timeout_secs: 2,
        },
        weather: WeatherConfig {
            base_url: weather_url.to_string(),
            timeout_secs: 2,
        },
        narrative: NarrativeConfig {
            api_key: None,
            base_url: UNROUTABLE.to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 300,
            temperature: 0.3,
            timeout_secs: 1,
        },
        slack: SlackConfig {
            base_url: UNROUTABLE.to_string(),
            bot_token: None,
            channel_id: None,
            timeout_secs: 1,
        },
        sheets: SheetsConfig {
            client_email: None,
            private_key: None,
            sheet_id: None,
            timeout_secs: 1,
        },
        thresholds: ThresholdConfig {
            min_temperature: 5.0,
            max_temperature: 35.0,
            humidity: 85.0,
            rain_probability: 30.0,
            wind_speed: 25.0,
        },
        risk: RiskBandConfig {
            medium_at: 1,
            high_at: 2,
        },
    }
}

/// Serve fixed geocoder and forecast payloads on an ephemeral local port
async fn spawn_upstream(search: Value, forecast: Value) -> String {
    let app = Router::new()
        .route(
            "/search",
            get(move || {
                let payload = search.clone();
                async move { Json(payload) }
            }),
        )
        .route(
            "/forecast",
            get(move || {
                let payload = forecast.clone();
                async move { Json(payload) }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn geocoder_hit() -> Value {
    json!([{
        "lat": "51.5072",
        "lon": "-0.1276",
        "display_name": "London, Greater London, England, United Kingdom"
    }])
}

fn calm_day_forecast() -> Value {
    json!({
        "hourly": {
            "time": ["2025-06-15T00:00", "2025-06-15T01:00", "2025-06-15T02:00"],
            "temperature_2m": [20.0, null, 24.0],
            "relative_humidity_2m": [60.0, 70.0, null],
            "precipitation_probability": [10, 20, null],
            "wind_speed_10m": [10.0, 20.0, null]
        }
    })
}

fn stormy_day_forecast() -> Value {
    json!({
        "hourly": {
            "time": ["2025-06-15T00:00", "2025-06-15T01:00"],
            "temperature_2m": [39.0, 41.0],
            "relative_humidity_2m": [88.0, 92.0],
            "precipitation_probability": [30, 50],
            "wind_speed_10m": [28.0, 32.0]
        }
    })
}

async fn post_assessment(app: Router, payload: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/assess-risk")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn calm_day_assessment_is_low_risk_with_failed_dispatches() {
    let upstream = spawn_upstream(geocoder_hit(), calm_day_forecast()).await;
    let state = AppState::new(test_config(&upstream, &upstream)).unwrap();
    let app = create_app(state);

    let (status, body) = post_assessment(
        app,
        json!({ "siteAddress": "10 Downing Street, London", "date": "2025-06-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let assessment = &body["assessment"];
    assert_eq!(assessment["siteAddress"], "10 Downing Street, London");
    assert_eq!(assessment["date"], "2025-06-15");
    assert_eq!(
        assessment["coordinates"]["displayName"],
        "London, Greater London, England, United Kingdom"
    );

    // Nulls are excluded from the means; rain takes the maximum
    let weather = &assessment["weather"];
    assert_eq!(weather["temperature"], json!(22.0));
    assert_eq!(weather["humidity"], json!(65));
    assert_eq!(weather["rainProbability"], json!(20));
    assert_eq!(weather["windSpeed"], json!(15.0));

    assert_eq!(assessment["riskLevel"], "LOW");
    assert_eq!(
        assessment["riskFactors"],
        json!({
            "temperatureOutOfRange": false,
            "exceedsHumidityThreshold": false,
            "exceedsRainThreshold": false,
            "exceedsWindThreshold": false
        })
    );

    // No narrative key configured, so the deterministic fallback applies
    let narrative = assessment["narrative"].as_str().unwrap();
    assert!(narrative.contains("favorable"));

    // The assessment stands even though both channels are unconfigured
    assert_eq!(
        body["notifications"],
        json!({ "slack": "failed", "sheets": "failed" })
    );
}

#[tokio::test]
async fn stormy_day_assessment_is_high_risk() {
    let upstream = spawn_upstream(geocoder_hit(), stormy_day_forecast()).await;
    let state = AppState::new(test_config(&upstream, &upstream)).unwrap();
    let app = create_app(state);

    let (status, body) = post_assessment(
        app,
        json!({ "siteAddress": "10 Downing Street, London", "date": "2025-06-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let assessment = &body["assessment"];
    assert_eq!(assessment["weather"]["temperature"], json!(40.0));
    assert_eq!(assessment["weather"]["humidity"], json!(90));
    assert_eq!(assessment["weather"]["rainProbability"], json!(50));
    assert_eq!(assessment["weather"]["windSpeed"], json!(30.0));
    assert_eq!(assessment["riskLevel"], "HIGH");

    let narrative = assessment["narrative"].as_str().unwrap();
    assert!(narrative.starts_with("HIGH risk detected due to temperature, humidity, rain, wind"));
}

#[tokio::test]
async fn unreachable_geocoder_fails_the_pipeline() {
    let state = AppState::new(test_config(UNROUTABLE, UNROUTABLE)).unwrap();
    let app = create_app(state);

    let (status, body) = post_assessment(
        app,
        json!({ "siteAddress": "10 Downing Street, London", "date": "2025-06-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("Geocoding"));
    assert!(body.get("assessment").is_none());
}

#[tokio::test]
async fn unresolved_address_fails_the_pipeline() {
    let upstream = spawn_upstream(json!([]), calm_day_forecast()).await;
    let state = AppState::new(test_config(&upstream, &upstream)).unwrap();
    let app = create_app(state);

    let (status, body) = post_assessment(
        app,
        json!({ "siteAddress": "Nowhere In Particular 99999", "date": "2025-06-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("Address not found"));
}

#[tokio::test]
async fn all_null_temperatures_abort_instead_of_fabricating() {
    let forecast = json!({
        "hourly": {
            "time": ["2025-06-15T00:00", "2025-06-15T01:00"],
            "temperature_2m": [null, null],
            "relative_humidity_2m": [60.0, 70.0],
            "precipitation_probability": [10, 20],
            "wind_speed_10m": [10.0, 20.0]
        }
    });
    let upstream = spawn_upstream(geocoder_hit(), forecast).await;
    let state = AppState::new(test_config(&upstream, &upstream)).unwrap();
    let app = create_app(state);

    let (status, body) = post_assessment(
        app,
        json!({ "siteAddress": "10 Downing Street, London", "date": "2025-06-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("temperature"));
}

#[tokio::test]
async fn short_address_is_rejected_before_the_pipeline_runs() {
    let state = AppState::new(test_config(UNROUTABLE, UNROUTABLE)).unwrap();
    let app = create_app(state);

    let (status, body) =
        post_assessment(app, json!({ "siteAddress": "1234", "date": "2025-06-15" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("at least 5"));
}

#[tokio::test]
async fn invalid_date_is_rejected_before_the_pipeline_runs() {
    let state = AppState::new(test_config(UNROUTABLE, UNROUTABLE)).unwrap();
    let app = create_app(state);

    let (status, body) = post_assessment(
        app,
        json!({ "siteAddress": "10 Downing Street, London", "date": "not-a-date" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("ISO calendar date"));
}

#[tokio::test]
async fn health_reports_configuration_summary() {
    let state = AppState::new(test_config(UNROUTABLE, UNROUTABLE)).unwrap();
    let app = create_app(state);

    let (status, body) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["environment"], "test");
    assert_eq!(body["thresholds"]["minTemperature"], json!(5.0));
    assert_eq!(body["thresholds"]["windSpeedKmh"], json!(25.0));
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn unknown_routes_return_json_not_found() {
    let state = AppState::new(test_config(UNROUTABLE, UNROUTABLE)).unwrap();
    let app = create_app(state);

    let (status, body) = get_json(app, "/api/no-such-route").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], "Route not found");
}
