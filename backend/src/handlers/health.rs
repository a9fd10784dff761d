//! Service information and health check handlers

use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Service banner with the endpoint map
pub async fn root() -> Json<RootResponse> {
    let endpoints = BTreeMap::from([
        ("crop_designer", "/ai/crop-designer"),
        ("sensor_status", "/ai/sensor-status"),
        ("plant_health", "/ai/plant-health"),
        ("growth_predictor", "/ai/growth-predictor"),
        ("farmchat", "/ai/farmchat"),
        ("farmchat_status", "/ai/farmchat/status"),
        ("weather_current", "/ai/weather/current"),
        ("weather_forecast", "/ai/weather/forecast"),
    ]);

    Json(RootResponse {
        message: "FarmMind AI API is running!".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

/// Health check endpoint handler
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
