//! Route definitions for the FarmMind API

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::{handlers, AppState};

/// Routes mounted under `/ai`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/crop-designer", post(handlers::design_crop_plan))
        .route("/sensor-status", get(handlers::get_sensor_status))
        .route("/sensor-status/baseline", patch(handlers::update_sensor_baseline))
        .route("/plant-health", post(handlers::analyze_plant_health))
        .route("/growth-predictor", post(handlers::predict_growth))
        .route("/farmchat", post(handlers::chat_with_farm_gpt))
        .route("/farmchat/status", get(handlers::get_chat_status))
        .nest("/weather", weather_routes())
}

fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/current", get(handlers::get_current_weather))
        .route("/forecast", get(handlers::get_weather_forecast))
}
