//! FarmMind - rooftop farming assistant backend
//!
//! Simulated sensors and weather, crop planning, growth prediction, leaf
//! disease diagnosis and a farming chat assistant. The local LLM service is
//! optional; every endpoint answers without it.

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use external::OllamaClient;
use services::{SensorSimulator, WeatherSimulator};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sensors: Arc<SensorSimulator>,
    pub weather: Arc<WeatherSimulator>,
    pub ollama: OllamaClient,
    /// Bounds concurrent LLM calls across all handlers
    pub llm_permits: Arc<Semaphore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            sensors: Arc::new(SensorSimulator::new(config.sensor_baseline())),
            weather: Arc::new(WeatherSimulator::new()),
            ollama: OllamaClient::new(&config.ollama),
            llm_permits: Arc::new(Semaphore::new(config.ollama.max_concurrent_requests.max(1))),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_upload_bytes = state.config.server.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/ai", routes::api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new())
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}
