//! Shared types and models for the FarmMind rooftop farming assistant
//!
//! This crate contains the deterministic domain rules shared between the
//! backend and the browser client (via WASM): lookup tables, classification
//! rules and the offline fallback answers.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
