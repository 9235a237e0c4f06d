//! Arena state and episode lifecycle.
//!
//! [`Arena`] owns the whole simulation: the player, the bot population and the
//! orb field. Everything outside talks to it through [`Arena::tick`] and the
//! read-only views.

mod tick;

use crate::ai::BotManager;
use crate::config::Config;
use crate::entity::{Chain, Snake};
use crate::error::ConfigError;
use crate::leaderboard;
use crate::world::{OrbField, WorldBounds};
use protocol::{
    ArenaEvent, Color, DeathCause, FinalScore, FrameSnapshot, HudStats, LeaderboardEntry, Point,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::f64::consts::FRAC_PI_2;
use tracing::info;

/// Player color.
const PLAYER_COLOR: Color = Color::new(80, 220, 120);

/// Result of one tick.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickOutcome {
    pub events: Vec<ArenaEvent>,
    /// Set on the tick the player dies, at most once per episode.
    pub final_score: Option<FinalScore>,
}

/// How the last episode ended.
#[derive(Debug, Clone, PartialEq)]
pub struct GameOver {
    pub cause: DeathCause,
    pub score: i64,
    pub rank: usize,
}

/// The simulation aggregate.
#[derive(Debug)]
pub struct Arena {
    pub config: Config,
    pub bounds: WorldBounds,
    pub player: Snake,
    pub player_alive: bool,
    /// True between `start_game` and teardown.
    pub started: bool,
    pub bots: BotManager,
    pub orbs: OrbField,
    pub tick_count: u64,
    /// Virtual clock, advanced by each tick's `dt_ms`.
    pub now_ms: u64,
    pub game_over: Option<GameOver>,
    hud: HudStats,
    leaderboard: Vec<LeaderboardEntry>,
    score_submitted: bool,
    rng: StdRng,
}

impl Arena {
    /// Create an arena. Nothing moves until [`Arena::start_game`].
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let bounds = WorldBounds::new(config.world.width, config.world.height);
        let player = Self::fresh_player(&config, &bounds);

        Ok(Self {
            config,
            bounds,
            player,
            player_alive: false,
            started: false,
            bots: BotManager::new(),
            orbs: OrbField::new(),
            tick_count: 0,
            now_ms: 0,
            game_over: None,
            hud: HudStats::default(),
            leaderboard: Vec::new(),
            score_submitted: false,
            rng,
        })
    }

    fn fresh_player(config: &Config, bounds: &WorldBounds) -> Snake {
        let heading = -FRAC_PI_2;
        let chain = Chain::straight(
            bounds.center(),
            heading,
            config.player.initial_length,
            config.player.segment_distance,
        );
        Snake::player(config.simulation.player_name.clone(), PLAYER_COLOR, chain, heading)
    }

    /// Begin a new episode. Returns a `BotSpawned` event per initial bot.
    pub fn start_game(&mut self) -> Vec<ArenaEvent> {
        self.started = true;
        let events = self.reset_world();
        info!(
            "Episode started: {} bots, {} orbs in {}x{}",
            self.bots.len(),
            self.orbs.orbs.len(),
            self.bounds.width,
            self.bounds.height
        );
        events
    }

    /// Throw away the current episode and start another.
    pub fn reset_game(&mut self) -> Vec<ArenaEvent> {
        info!("Resetting arena after {} ticks", self.tick_count);
        self.start_game()
    }

    /// Stop ticking without starting a new episode.
    pub fn stop(&mut self) {
        self.started = false;
    }

    fn reset_world(&mut self) -> Vec<ArenaEvent> {
        self.player = Self::fresh_player(&self.config, &self.bounds);
        self.player_alive = true;
        self.tick_count = 0;
        self.game_over = None;
        self.score_submitted = false;

        self.bots = BotManager::new();
        let spawned = self
            .bots
            .fill(self.config.bots.count, &self.config, &self.bounds, self.now_ms, &mut self.rng);
        let events: Vec<ArenaEvent> = spawned
            .into_iter()
            .filter_map(|id| self.bots.get_bot(id))
            .map(|bot| ArenaEvent::BotSpawned {
                id: bot.id,
                name: bot.name.clone(),
            })
            .collect();

        self.orbs = OrbField::new();
        self.orbs.replenish(
            self.config.orbs.count,
            &self.bounds,
            (self.config.orbs.min_size, self.config.orbs.max_size),
            &mut self.rng,
        );

        self.refresh_derived();
        events
    }

    /// True while ticks mutate the world.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.started && self.player_alive
    }

    #[inline]
    pub fn hud(&self) -> HudStats {
        self.hud
    }

    /// Leaderboard as of the last tick.
    #[inline]
    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    /// The point the camera follows.
    #[inline]
    pub fn camera_center(&self) -> Point {
        self.player.chain.head()
    }

    /// Copy of everything the renderer draws.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            tick: self.tick_count,
            world_width: self.bounds.width,
            world_height: self.bounds.height,
            camera_center: self.camera_center(),
            player: self.player.view(),
            player_alive: self.player_alive,
            bots: self.bots.bots.iter().map(Snake::view).collect(),
            orbs: self.orbs.orbs.clone(),
            death_orbs: self.orbs.death_orbs.clone(),
            hud: self.hud,
        }
    }

    /// Recompute the leaderboard and HUD numbers.
    fn refresh_derived(&mut self) {
        let player = self.started.then_some(&self.player);
        self.leaderboard = leaderboard::generate(player, &self.bots.bots);
        self.hud = HudStats {
            score: self.player.score,
            length: self.player.len(),
            bot_count: self.bots.len(),
            rank: leaderboard::player_rank(&self.leaderboard).unwrap_or(0),
            boost: self.player.boost().map(|b| b.view()).unwrap_or_default(),
        };
    }
}
