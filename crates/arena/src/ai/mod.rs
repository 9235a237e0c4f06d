//! Bot AI: population management and steering.

pub mod bot_manager;
pub mod steering;

pub use bot_manager::BotManager;
pub use steering::{SteeringForces, Surroundings};
