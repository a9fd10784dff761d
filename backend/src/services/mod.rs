//! Business logic services for FarmMind

pub mod crop_designer;
pub mod diagnosis;
pub mod farmchat;
pub mod growth;
pub mod image_analysis;
pub mod plant_health;
pub mod sensor;
pub mod weather;

pub use farmchat::FarmChatService;
pub use growth::GrowthService;
pub use plant_health::PlantHealthService;
pub use sensor::SensorSimulator;
pub use weather::WeatherSimulator;
