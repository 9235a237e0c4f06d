//! Slither arena simulation core.

pub mod ai;
pub mod boost;
pub mod collision;
pub mod config;
pub mod entity;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod runner;
pub mod world;

// Re-export commonly used types
pub use config::Config;
pub use error::ConfigError;
pub use game::{Arena, GameOver, TickOutcome};
pub use runner::{LogScoreSink, ScoreSink, run, run_game_loop};
