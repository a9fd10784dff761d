//! HTTP request handlers

pub mod crop_designer;
pub mod farmchat;
pub mod growth;
pub mod health;
pub mod plant_health;
pub mod sensor;
pub mod weather;

pub use crop_designer::design_crop_plan;
pub use farmchat::{chat_with_farm_gpt, get_chat_status};
pub use growth::predict_growth;
pub use health::{health_check, root};
pub use plant_health::analyze_plant_health;
pub use sensor::{get_sensor_status, update_sensor_baseline};
pub use weather::{get_current_weather, get_weather_forecast};
