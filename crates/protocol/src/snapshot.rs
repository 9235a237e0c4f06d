//! Read-only views handed to the renderer and HUD.

use crate::{Color, EntityId, Point};

/// Ambient collectible.
#[derive(Debug, Clone, PartialEq)]
pub struct Orb {
    pub position: Point,
    pub color: Color,
    pub size: f64,
    pub pulse_phase: f64,
}

/// Collectible left behind by a dead snake.
#[derive(Debug, Clone, PartialEq)]
pub struct DeathOrb {
    pub orb: Orb,
    pub value: i64,
}

/// Power-up state as seen by the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoostView {
    #[default]
    Idle,
    Active { remaining_ms: u64 },
    Cooldown { remaining_ms: u64 },
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub id: EntityId,
    pub name: String,
    pub score: i64,
    pub length: usize,
    pub is_player: bool,
    pub color: Color,
}

/// Derived numbers recomputed at the end of every tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HudStats {
    pub score: i64,
    pub length: usize,
    pub bot_count: usize,
    /// 1-based rank of the player, 0 before the first tick of an episode.
    pub rank: usize,
    pub boost: BoostView,
}

/// A snake body as drawn by the renderer, head first.
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeView {
    pub id: EntityId,
    pub name: String,
    pub color: Color,
    pub points: Vec<Point>,
    pub is_player: bool,
}

/// Everything the renderer needs to draw a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub world_width: f64,
    pub world_height: f64,
    /// World point the camera is centred on (the player head).
    pub camera_center: Point,
    pub player: SnakeView,
    pub player_alive: bool,
    pub bots: Vec<SnakeView>,
    pub orbs: Vec<Orb>,
    pub death_orbs: Vec<DeathOrb>,
    pub hud: HudStats,
}
