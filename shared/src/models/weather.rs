//! Weather data models

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::{mean, Bounds};

/// Probability that a simulated day has no rain at all
pub const DRY_DAY_PROBABILITY: f64 = 0.7;
/// Rainfall drawn on a wet day (mm)
pub const RAINFALL_RANGE: Bounds = Bounds::new(0.0, 20.0);
/// Daily relative humidity (%)
pub const DAILY_HUMIDITY_RANGE: Bounds = Bounds::new(40.0, 80.0);

/// Daily simulated weather
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherDay {
    pub date: NaiveDate,
    pub temperature: f64,
    pub rainfall: f64,
    pub humidity: f64,
    pub conditions: Conditions,
}

/// Current conditions for a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location: String,
    pub date: NaiveDate,
    pub temperature: f64,
    pub humidity: f64,
    pub conditions: Conditions,
}

/// Sky conditions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Conditions {
    Rainy,
    Sunny,
    Cloudy,
    PartlyCloudy,
}

/// Classify a day from its temperature and rainfall.
/// Rain takes priority, then heat, then cold.
pub fn classify_conditions(temperature: f64, rainfall: f64) -> Conditions {
    if rainfall > 5.0 {
        Conditions::Rainy
    } else if temperature > 28.0 {
        Conditions::Sunny
    } else if temperature < 10.0 {
        Conditions::Cloudy
    } else {
        Conditions::PartlyCloudy
    }
}

/// Northern-hemisphere meteorological season
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Autumn,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }

    /// Daily temperature band (°C)
    pub fn temperature_band(&self) -> Bounds {
        match self {
            Season::Spring => Bounds::new(15.0, 25.0),
            Season::Summer => Bounds::new(25.0, 35.0),
            Season::Autumn => Bounds::new(10.0, 20.0),
            Season::Winter => Bounds::new(5.0, 15.0),
        }
    }
}

/// Qualitative effect of a forecast on a crop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeatherImpact {
    Optimal,
    ExtremeTemperature { average_temperature: f64 },
    Moderate,
}

impl WeatherImpact {
    pub fn message(&self) -> String {
        match self {
            WeatherImpact::Optimal => {
                "Optimal conditions expected. Your crop should thrive!".to_string()
            }
            WeatherImpact::ExtremeTemperature { average_temperature } => format!(
                "Temperature extremes expected (avg: {:.1}°C). Consider protective measures.",
                average_temperature
            ),
            WeatherImpact::Moderate => {
                "Moderate conditions. Regular monitoring recommended.".to_string()
            }
        }
    }
}

/// Judge averages over a growing horizon
pub fn classify_weather_impact(average_temperature: f64, average_rainfall: f64) -> WeatherImpact {
    if (18.0..=25.0).contains(&average_temperature) && (5.0..=15.0).contains(&average_rainfall) {
        WeatherImpact::Optimal
    } else if average_temperature < 15.0 || average_temperature > 30.0 {
        WeatherImpact::ExtremeTemperature { average_temperature }
    } else {
        WeatherImpact::Moderate
    }
}

/// Average the forecast and classify it
pub fn assess_weather_impact(days: &[WeatherDay]) -> WeatherImpact {
    let temperatures: Vec<f64> = days.iter().map(|d| d.temperature).collect();
    let rainfall: Vec<f64> = days.iter().map(|d| d.rainfall).collect();
    classify_weather_impact(mean(&temperatures), mean(&rainfall))
}
