//! Sensor simulator for rooftop farm monitoring
//!
//! Produces instantaneous temperature, humidity, soil moisture and light
//! readings around a baseline, with a day/night cycle on temperature and
//! sunlight.

use chrono::{DateTime, FixedOffset, Local, Timelike};
use rand::Rng;
use tokio::sync::RwLock;

use shared::{
    classify_sensor_status, round1, SensorBaseline, SensorBaselineUpdate, SensorReading,
    HUMIDITY_RANGE, SOIL_MOISTURE_RANGE, SUNLIGHT_RANGE, TEMPERATURE_RANGE,
};

/// Simulated sensor array with an adjustable baseline
#[derive(Debug)]
pub struct SensorSimulator {
    baseline: RwLock<SensorBaseline>,
}

impl SensorSimulator {
    /// Create a new SensorSimulator around the given baseline
    pub fn new(baseline: SensorBaseline) -> Self {
        Self {
            baseline: RwLock::new(baseline),
        }
    }

    pub async fn baseline(&self) -> SensorBaseline {
        *self.baseline.read().await
    }

    /// Apply a partial baseline update and return the result
    pub async fn update_baseline(&self, update: &SensorBaselineUpdate) -> SensorBaseline {
        let mut baseline = self.baseline.write().await;
        baseline.apply(update);
        tracing::info!("Sensor baseline updated: {:?}", *baseline);
        *baseline
    }

    /// Take a reading at the current local time
    pub async fn read(&self) -> SensorReading {
        let baseline = self.baseline().await;
        let now = Local::now().fixed_offset();
        simulate_reading(&baseline, now, &mut rand::thread_rng())
    }
}

impl Default for SensorSimulator {
    fn default() -> Self {
        Self::new(SensorBaseline::default())
    }
}

/// Daylight hours, inclusive on both ends
pub fn is_daytime(hour: u32) -> bool {
    (6..=18).contains(&hour)
}

/// Generate one reading for the hour of `timestamp`
pub fn simulate_reading<R: Rng + ?Sized>(
    baseline: &SensorBaseline,
    timestamp: DateTime<FixedOffset>,
    rng: &mut R,
) -> SensorReading {
    // Daylight swings around the baseline; night light ignores it
    let (temp_variation, sunlight_level): (f64, f64) = if is_daytime(timestamp.hour()) {
        (
            rng.gen_range(-2.0..=5.0),
            baseline.sunlight + rng.gen_range(-15_000.0..=35_000.0),
        )
    } else {
        (rng.gen_range(-5.0..=2.0), rng.gen_range(0.0..=5_000.0))
    };

    let temperature = baseline.temperature + temp_variation + rng.gen_range(-1.0..=1.0);
    let humidity = baseline.humidity + rng.gen_range(-10.0..=10.0);
    let soil_moisture = baseline.soil_moisture + rng.gen_range(-15.0..=15.0);
    let sunlight = (sunlight_level + rng.gen_range(-5_000.0..=5_000.0)).max(0.0);

    let temperature = round1(TEMPERATURE_RANGE.clamp(temperature));
    let humidity = round1(HUMIDITY_RANGE.clamp(humidity));
    let soil_moisture = round1(SOIL_MOISTURE_RANGE.clamp(soil_moisture));
    let sunlight_intensity = SUNLIGHT_RANGE.clamp(sunlight).round();

    SensorReading {
        temperature,
        humidity,
        soil_moisture,
        sunlight_intensity,
        timestamp,
        status: classify_sensor_status(temperature, humidity, soil_moisture),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::{rngs::StdRng, SeedableRng};

    fn at_hour(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 1, hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_daytime_window() {
        assert!(!is_daytime(5));
        assert!(is_daytime(6));
        assert!(is_daytime(18));
        assert!(!is_daytime(19));
    }

    #[test]
    fn test_night_is_dark() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let reading = simulate_reading(&SensorBaseline::default(), at_hour(23), &mut rng);
            assert!(reading.sunlight_intensity <= 10_000.0);
        }
    }

    #[test]
    fn test_day_is_bright() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let reading = simulate_reading(&SensorBaseline::default(), at_hour(12), &mut rng);
            assert!(reading.sunlight_intensity >= 25_000.0);
        }
    }

    #[test]
    fn test_day_light_follows_baseline() {
        let dim = SensorBaseline {
            sunlight: 10_000.0,
            ..SensorBaseline::default()
        };
        let bright = SensorBaseline {
            sunlight: 110_000.0,
            ..SensorBaseline::default()
        };

        let dim_reading = simulate_reading(&dim, at_hour(12), &mut StdRng::seed_from_u64(3));
        let bright_reading = simulate_reading(&bright, at_hour(12), &mut StdRng::seed_from_u64(3));
        assert!(dim_reading.sunlight_intensity <= 50_000.0);
        assert!(bright_reading.sunlight_intensity >= 90_000.0);

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let reading = simulate_reading(&bright, at_hour(23), &mut rng);
            assert!(reading.sunlight_intensity <= 10_000.0);
        }
    }

    #[tokio::test]
    async fn test_update_baseline_is_visible_to_reads() {
        let simulator = SensorSimulator::default();
        let updated = simulator
            .update_baseline(&SensorBaselineUpdate {
                temperature: Some(60.0),
                ..Default::default()
            })
            .await;
        assert_eq!(updated.temperature, 60.0);

        let reading = simulator.read().await;
        assert_eq!(reading.temperature, 40.0);
        assert_eq!(reading.status, shared::SensorStatus::Critical);
    }
}
