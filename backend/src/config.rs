//! Configuration management for the FarmMind backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FARMMIND__ prefix
//! 4. The conventional OLLAMA_API_URL / OLLAMA_MODEL / OLLAMA_VISION_MODEL variables

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use shared::SensorBaseline;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Local LLM service configuration
    pub ollama: OllamaConfig,

    /// Sensor simulator baseline
    pub sensor: SensorConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,

    /// Largest accepted request body (leaf photo uploads)
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OllamaConfig {
    /// Base URL of the Ollama HTTP API
    pub base_url: String,

    /// Model used for chat and text diagnosis
    pub text_model: String,

    /// Vision-capable model used for leaf photos
    pub vision_model: String,

    /// Liveness probe timeout
    pub probe_timeout_secs: u64,

    /// HTTP timeout of a chat completion
    pub chat_timeout_secs: u64,

    /// Wall-clock ceiling before chat answers from the fallback
    pub chat_deadline_secs: u64,

    /// HTTP timeout of a vision diagnosis
    pub vision_timeout_secs: u64,

    /// HTTP timeout of a text-description diagnosis
    pub text_timeout_secs: u64,

    /// Concurrent LLM requests allowed across all handlers
    pub max_concurrent_requests: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SensorConfig {
    pub base_temperature: f64,
    pub base_humidity: f64,
    pub base_soil_moisture: f64,
    pub base_sunlight: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FARMMIND_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.max_upload_bytes", 10 * 1024 * 1024)?
            .set_default("ollama.base_url", "http://localhost:11434")?
            .set_default("ollama.text_model", "llama2:latest")?
            .set_default("ollama.vision_model", "llava")?
            .set_default("ollama.probe_timeout_secs", 5)?
            .set_default("ollama.chat_timeout_secs", 15)?
            .set_default("ollama.chat_deadline_secs", 20)?
            .set_default("ollama.vision_timeout_secs", 45)?
            .set_default("ollama.text_timeout_secs", 30)?
            .set_default("ollama.max_concurrent_requests", 4)?
            .set_default("sensor.base_temperature", 22.0)?
            .set_default("sensor.base_humidity", 65.0)?
            .set_default("sensor.base_soil_moisture", 55.0)?
            .set_default("sensor.base_sunlight", 45000.0)?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FARMMIND__ prefix)
            .add_source(
                Environment::with_prefix("FARMMIND")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("ollama.base_url", std::env::var("OLLAMA_API_URL").ok())?
            .set_override_option("ollama.text_model", std::env::var("OLLAMA_MODEL").ok())?
            .set_override_option(
                "ollama.vision_model",
                std::env::var("OLLAMA_VISION_MODEL").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }

    pub fn sensor_baseline(&self) -> SensorBaseline {
        SensorBaseline {
            temperature: self.sensor.base_temperature,
            humidity: self.sensor.base_humidity,
            soil_moisture: self.sensor.base_soil_moisture,
            sunlight: self.sensor.base_sunlight,
        }
    }
}

impl OllamaConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat_timeout_secs)
    }

    pub fn chat_deadline(&self) -> Duration {
        Duration::from_secs(self.chat_deadline_secs)
    }

    pub fn vision_timeout(&self) -> Duration {
        Duration::from_secs(self.vision_timeout_secs)
    }

    pub fn text_timeout(&self) -> Duration {
        Duration::from_secs(self.text_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        let baseline = SensorBaseline::default();
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            ollama: OllamaConfig::default(),
            sensor: SensorConfig {
                base_temperature: baseline.temperature,
                base_humidity: baseline.humidity,
                base_soil_moisture: baseline.soil_moisture,
                base_sunlight: baseline.sunlight,
            },
            logging: LoggingConfig { json: false },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            text_model: "llama2:latest".to_string(),
            vision_model: "llava".to_string(),
            probe_timeout_secs: 5,
            chat_timeout_secs: 15,
            chat_deadline_secs: 20,
            vision_timeout_secs: 45,
            text_timeout_secs: 30,
            max_concurrent_requests: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_service_contract() {
        let config = Config::default();
        assert_eq!(config.ollama.probe_timeout(), Duration::from_secs(5));
        assert_eq!(config.ollama.chat_deadline(), Duration::from_secs(20));
        assert_eq!(config.ollama.vision_timeout(), Duration::from_secs(45));
        assert_eq!(config.sensor_baseline(), SensorBaseline::default());
    }
}
