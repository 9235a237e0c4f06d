//! Events emitted by the arena each tick.

use crate::{Color, Point};

/// Identifier of a snake. The player always uses [`PLAYER_ID`].
pub type EntityId = u32;

/// Entity id reserved for the player.
pub const PLAYER_ID: EntityId = 0;

/// Why a snake died.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeathCause {
    /// Head crossed the world margin.
    Boundary,
    /// Head touched the body of the named bot.
    Bot { id: EntityId, name: String },
    /// Bot head touched the player's body.
    Player,
}

/// Score submitted to the persistence collaborator, once per episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    pub score: i64,
}

/// Something that happened during a tick.
///
/// Particle bursts are fire-and-forget hints for the renderer; the core never
/// reads particles back.
#[derive(Debug, Clone, PartialEq)]
pub enum ArenaEvent {
    OrbCollected {
        collector: EntityId,
        position: Point,
        value: i64,
    },
    BotSpawned {
        id: EntityId,
        name: String,
    },
    BotDied {
        id: EntityId,
        name: String,
        cause: DeathCause,
        position: Point,
        length: usize,
    },
    PlayerDied {
        cause: DeathCause,
        score: i64,
        rank: usize,
    },
    ParticleBurst {
        position: Point,
        color: Color,
        count: u32,
    },
}
