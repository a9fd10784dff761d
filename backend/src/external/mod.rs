//! External API integrations

pub mod ollama;

pub use ollama::OllamaClient;
