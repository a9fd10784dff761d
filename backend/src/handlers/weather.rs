//! HTTP handlers for simulated weather

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::AppState;
use shared::{validate_forecast_days, CurrentWeather, WeatherDay};

/// Default forecast horizon
pub const DEFAULT_FORECAST_DAYS: u32 = 7;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub location: String,
    pub days: Option<u32>,
}

/// Current conditions for a location
pub async fn get_current_weather(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Json<CurrentWeather> {
    Json(state.weather.current(&query.location))
}

/// Daily forecast for a location
pub async fn get_weather_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<Vec<WeatherDay>>> {
    let days = query.days.unwrap_or(DEFAULT_FORECAST_DAYS);
    validate_forecast_days(days).map_err(|e| AppError::validation("days", e))?;

    Ok(Json(state.weather.forecast(&query.location, days)))
}
