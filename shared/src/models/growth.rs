//! Growth prediction models

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::crop::{format_yield_kg, CropProfile};
use super::weather::{assess_weather_impact, WeatherDay};

/// Growth predictor request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthPredictionRequest {
    pub crop: String,
    /// ISO-8601 planting date or timestamp
    pub planting_date: String,
    pub location: String,
    pub rooftop_area: f64,
}

/// Yield and timeline forecast for a crop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthPrediction {
    /// Knowledge-base crop the prediction was computed for
    pub crop: String,
    pub estimated_yield: String,
    pub harvest_days: u32,
    pub harvest_date: String,
    pub growth_stages: Vec<String>,
    pub weather_impact: String,
    pub recommendations: String,
}

/// Parse an ISO-8601 planting date.
///
/// Accepts RFC 3339 timestamps, naive timestamps and bare dates; naive
/// values are taken as UTC.
pub fn parse_planting_date(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Assemble a prediction from a crop profile and the forecast for its horizon
pub fn build_growth_prediction(
    profile: &CropProfile,
    requested_crop: &str,
    location: &str,
    rooftop_area: f64,
    planted_at: DateTime<FixedOffset>,
    forecast: &[WeatherDay],
) -> GrowthPrediction {
    let harvest_date = planted_at + Duration::days(i64::from(profile.harvest_days));
    let impact = assess_weather_impact(forecast);

    GrowthPrediction {
        crop: profile.name.to_string(),
        estimated_yield: format_yield_kg(rooftop_area * profile.yield_per_sqm),
        harvest_days: profile.harvest_days,
        harvest_date: harvest_date.to_rfc3339(),
        growth_stages: profile.stages.iter().map(|s| s.to_string()).collect(),
        weather_impact: impact.message(),
        recommendations: format!(
            "Plant {} in {}. Expected harvest in {} days. Maintain consistent watering and monitor for pests.",
            requested_crop, location, profile.harvest_days
        ),
    }
}
