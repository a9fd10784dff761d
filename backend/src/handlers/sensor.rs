//! HTTP handlers for simulated sensor readings

use axum::{extract::State, Json};

use crate::error::{AppError, AppResult};
use crate::AppState;
use shared::{SensorBaseline, SensorBaselineUpdate, SensorReading};

/// Current simulated reading
pub async fn get_sensor_status(State(state): State<AppState>) -> Json<SensorReading> {
    Json(state.sensors.read().await)
}

/// Shift the simulator baseline
pub async fn update_sensor_baseline(
    State(state): State<AppState>,
    Json(update): Json<SensorBaselineUpdate>,
) -> AppResult<Json<SensorBaseline>> {
    let values = [
        ("temperature", update.temperature),
        ("humidity", update.humidity),
        ("soil_moisture", update.soil_moisture),
        ("sunlight", update.sunlight),
    ];
    if let Some((field, _)) = values
        .iter()
        .find(|(_, value)| value.is_some_and(|v| !v.is_finite()))
    {
        return Err(AppError::validation(field, "Baseline values must be finite"));
    }

    let baseline = state.sensors.update_baseline(&update).await;
    Ok(Json(baseline))
}
