//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Closed numeric interval `[min, max]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Arithmetic mean, zero for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Capitalise the first letter of every whitespace-separated word
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_clamp() {
        let bounds = Bounds::new(5.0, 40.0);
        assert_eq!(bounds.clamp(2.0), 5.0);
        assert_eq!(bounds.clamp(45.0), 40.0);
        assert_eq!(bounds.clamp(22.5), 22.5);
        assert!(bounds.contains(5.0));
        assert!(!bounds.contains(40.1));
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(22.46), 22.5);
        assert_eq!(round1(-1.04), -1.0);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("powdery mildew"), "Powdery Mildew");
        assert_eq!(title_case("rust"), "Rust");
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    }
}
