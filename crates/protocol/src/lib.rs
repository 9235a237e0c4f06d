//! Shared data crate for native-slither.
//!
//! This crate contains:
//! - Frame input sent by the pointer/keyboard collaborator
//! - Snapshot types read by the renderer and HUD
//! - Tick events and the final score event
//! - Shared types (Color, Point, orbs)

mod error;
mod events;
mod input;
mod snapshot;

pub use error::InputError;
pub use events::{ArenaEvent, DeathCause, EntityId, FinalScore, PLAYER_ID};
pub use input::FrameInput;
pub use snapshot::{
    BoostView, DeathOrb, FrameSnapshot, HudStats, LeaderboardEntry, Orb, SnakeView,
};

/// RGB color used for snakes and orbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A world-space coordinate.
pub type Point = glam::DVec2;
