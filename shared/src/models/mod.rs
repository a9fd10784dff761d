//! Domain models for the FarmMind platform

mod chat;
mod crop;
mod growth;
mod plant_health;
mod sensor;
mod weather;

pub use chat::*;
pub use crop::*;
pub use growth::*;
pub use plant_health::*;
pub use sensor::*;
pub use weather::*;
