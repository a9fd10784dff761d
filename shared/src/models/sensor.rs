//! Rooftop sensor models

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::types::Bounds;

/// Physical range of the temperature probe (°C)
pub const TEMPERATURE_RANGE: Bounds = Bounds::new(5.0, 40.0);
/// Physical range of the humidity probe (%)
pub const HUMIDITY_RANGE: Bounds = Bounds::new(20.0, 95.0);
/// Physical range of the soil moisture probe (%)
pub const SOIL_MOISTURE_RANGE: Bounds = Bounds::new(10.0, 100.0);
/// Physical range of the light sensor (lux)
pub const SUNLIGHT_RANGE: Bounds = Bounds::new(0.0, 120_000.0);

/// Temperatures outside this band are critical for most crops
pub const SAFE_TEMPERATURE: Bounds = Bounds::new(10.0, 35.0);
pub const COMFORTABLE_SOIL_MOISTURE: Bounds = Bounds::new(30.0, 80.0);
pub const COMFORTABLE_HUMIDITY: Bounds = Bounds::new(20.0, 90.0);

/// A single simulated sensor snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    /// Air temperature in °C
    pub temperature: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Volumetric soil moisture in %
    pub soil_moisture: f64,
    /// Light intensity in lux
    pub sunlight_intensity: f64,
    pub timestamp: DateTime<FixedOffset>,
    pub status: SensorStatus,
}

/// Overall health of the readings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SensorStatus {
    Optimal,
    Warning,
    Critical,
}

impl std::fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorStatus::Optimal => write!(f, "optimal"),
            SensorStatus::Warning => write!(f, "warning"),
            SensorStatus::Critical => write!(f, "critical"),
        }
    }
}

/// Classify readings: critical temperature wins over any warning
pub fn classify_sensor_status(temperature: f64, humidity: f64, soil_moisture: f64) -> SensorStatus {
    if !SAFE_TEMPERATURE.contains(temperature) {
        SensorStatus::Critical
    } else if !COMFORTABLE_SOIL_MOISTURE.contains(soil_moisture)
        || !COMFORTABLE_HUMIDITY.contains(humidity)
    {
        SensorStatus::Warning
    } else {
        SensorStatus::Optimal
    }
}

/// Centre values the simulator varies around
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensorBaseline {
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
    pub sunlight: f64,
}

impl Default for SensorBaseline {
    fn default() -> Self {
        Self {
            temperature: 22.0,
            humidity: 65.0,
            soil_moisture: 55.0,
            sunlight: 45_000.0,
        }
    }
}

/// Partial baseline update; absent fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorBaselineUpdate {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub soil_moisture: Option<f64>,
    pub sunlight: Option<f64>,
}

impl SensorBaseline {
    pub fn apply(&mut self, update: &SensorBaselineUpdate) {
        if let Some(t) = update.temperature {
            self.temperature = t;
        }
        if let Some(h) = update.humidity {
            self.humidity = h;
        }
        if let Some(m) = update.soil_moisture {
            self.soil_moisture = m;
        }
        if let Some(s) = update.sunlight {
            self.sunlight = s;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_status() {
        assert_eq!(classify_sensor_status(22.0, 65.0, 55.0), SensorStatus::Optimal);
        assert_eq!(classify_sensor_status(10.0, 90.0, 30.0), SensorStatus::Optimal);
        assert_eq!(classify_sensor_status(35.0, 20.0, 80.0), SensorStatus::Optimal);
    }

    #[test]
    fn test_warning_status() {
        assert_eq!(classify_sensor_status(22.0, 65.0, 25.0), SensorStatus::Warning);
        assert_eq!(classify_sensor_status(22.0, 65.0, 85.0), SensorStatus::Warning);
        assert_eq!(classify_sensor_status(22.0, 92.0, 55.0), SensorStatus::Warning);
    }

    #[test]
    fn test_critical_overrides_warning() {
        assert_eq!(classify_sensor_status(9.9, 65.0, 55.0), SensorStatus::Critical);
        assert_eq!(classify_sensor_status(35.1, 92.0, 15.0), SensorStatus::Critical);
    }

    #[test]
    fn test_baseline_partial_update() {
        let mut baseline = SensorBaseline::default();
        baseline.apply(&SensorBaselineUpdate {
            temperature: Some(18.0),
            ..Default::default()
        });
        assert_eq!(baseline.temperature, 18.0);
        assert_eq!(baseline.humidity, 65.0);
        assert_eq!(baseline.sunlight, 45_000.0);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Out-of-band temperature is critical whatever the other readings
        #[test]
        fn prop_unsafe_temperature_is_critical(
            temperature in prop_oneof![-40.0f64..9.99, 35.01f64..60.0],
            humidity in 0.0f64..100.0,
            soil_moisture in 0.0f64..100.0
        ) {
            prop_assert_eq!(
                classify_sensor_status(temperature, humidity, soil_moisture),
                SensorStatus::Critical
            );
        }

        /// Inside every comfort band the status is optimal
        #[test]
        fn prop_comfortable_is_optimal(
            temperature in 10.0f64..=35.0,
            humidity in 20.0f64..=90.0,
            soil_moisture in 30.0f64..=80.0
        ) {
            prop_assert_eq!(
                classify_sensor_status(temperature, humidity, soil_moisture),
                SensorStatus::Optimal
            );
        }
    }
}
