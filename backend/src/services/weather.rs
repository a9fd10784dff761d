//! Weather simulator
//!
//! Seasonal random forecasts. The location is accepted for logging only;
//! no geographic data is involved.

use chrono::{Local, NaiveDate};
use rand::Rng;

use shared::{
    classify_conditions, round1, CurrentWeather, Season, WeatherDay, DAILY_HUMIDITY_RANGE,
    DRY_DAY_PROBABILITY, RAINFALL_RANGE,
};

#[derive(Debug, Clone, Default)]
pub struct WeatherSimulator;

impl WeatherSimulator {
    pub fn new() -> Self {
        Self
    }

    /// Forecast of `days` days starting today
    pub fn forecast(&self, location: &str, days: u32) -> Vec<WeatherDay> {
        self.forecast_from(location, Local::now().date_naive(), days)
    }

    /// Forecast of `days` days starting at `start`
    pub fn forecast_from(&self, location: &str, start: NaiveDate, days: u32) -> Vec<WeatherDay> {
        tracing::debug!(
            "Simulating {} day forecast for {} from {}",
            days,
            location,
            start
        );
        simulate_forecast(start, days, &mut rand::thread_rng())
    }

    /// Today's conditions
    pub fn current(&self, location: &str) -> CurrentWeather {
        let today = simulate_day(Local::now().date_naive(), &mut rand::thread_rng());
        CurrentWeather {
            location: location.to_string(),
            date: today.date,
            temperature: today.temperature,
            humidity: today.humidity,
            conditions: today.conditions,
        }
    }
}

/// One simulated day
pub fn simulate_day<R: Rng + ?Sized>(date: NaiveDate, rng: &mut R) -> WeatherDay {
    let band = Season::from_date(date).temperature_band();
    let temperature = round1(rng.gen_range(band.min..=band.max));
    let rainfall = if rng.gen_bool(DRY_DAY_PROBABILITY) {
        0.0
    } else {
        round1(rng.gen_range(RAINFALL_RANGE.min..=RAINFALL_RANGE.max))
    };
    let humidity = round1(rng.gen_range(DAILY_HUMIDITY_RANGE.min..=DAILY_HUMIDITY_RANGE.max));

    WeatherDay {
        date,
        temperature,
        rainfall,
        humidity,
        conditions: classify_conditions(temperature, rainfall),
    }
}

/// Consecutive days from `start`
pub fn simulate_forecast<R: Rng + ?Sized>(start: NaiveDate, days: u32, rng: &mut R) -> Vec<WeatherDay> {
    start
        .iter_days()
        .take(days as usize)
        .map(|date| simulate_day(date, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_forecast_dates_are_consecutive() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let days = simulate_forecast(start, 5, &mut rng);

        let dates: Vec<String> = days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(
            dates,
            ["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01", "2024-03-02"]
        );
    }

    #[test]
    fn test_season_follows_each_day() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = NaiveDate::from_ymd_opt(2024, 5, 30).unwrap();
        for day in simulate_forecast(start, 10, &mut rng) {
            let band = Season::from_date(day.date).temperature_band();
            assert!(band.contains(day.temperature), "{:?}", day);
        }
    }

    #[test]
    fn test_zero_days() {
        let simulator = WeatherSimulator::new();
        assert!(simulator.forecast("Bangkok", 0).is_empty());
    }

    #[test]
    fn test_current_echoes_location() {
        let current = WeatherSimulator::new().current("Osaka");
        assert_eq!(current.location, "Osaka");
        assert!((40.0..=80.0).contains(&current.humidity));
    }
}
