//! Arena configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub bots: BotConfig,
    #[serde(default)]
    pub steering: SteeringConfig,
    #[serde(default)]
    pub orbs: OrbConfig,
    #[serde(default)]
    pub collision: CollisionConfig,
}

impl Config {
    /// Load configuration from `config.toml` or use defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load configuration from `path`, writing a default file when it is missing.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<Self>(&contents)?
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            default_config
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        let w = &self.world;
        if !(w.width > 2.0 * w.boundary_margin && w.height > 2.0 * w.boundary_margin) {
            return Err(ConfigError::WorldTooSmall {
                width: w.width,
                height: w.height,
                margin: w.boundary_margin,
            });
        }
        if self.player.initial_length == 0 {
            return Err(ConfigError::EmptyChain);
        }

        let positive = [
            ("player.segment_distance", self.player.segment_distance),
            ("player.base_speed", self.player.base_speed),
            ("player.boost_multiplier", self.player.boost_multiplier),
            ("bots.min_speed", self.bots.min_speed),
            ("orbs.collect_radius", self.orbs.collect_radius),
            ("orbs.min_size", self.orbs.min_size),
            ("collision.radius", self.collision.radius),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let b = &self.bots;
        if !(0.0..=1.0).contains(&b.min_aggressiveness)
            || !(0.0..=1.0).contains(&b.max_aggressiveness)
            || b.min_aggressiveness > b.max_aggressiveness
        {
            return Err(ConfigError::Aggressiveness {
                min: b.min_aggressiveness,
                max: b.max_aggressiveness,
            });
        }
        if b.min_speed > b.max_speed {
            return Err(ConfigError::InvertedRange { field: "bots.speed" });
        }
        if b.wander_min_ms > b.wander_max_ms {
            return Err(ConfigError::InvertedRange { field: "bots.wander_ms" });
        }
        if self.orbs.min_size > self.orbs.max_size {
            return Err(ConfigError::InvertedRange { field: "orbs.size" });
        }
        Ok(())
    }

    /// Every floating-point setting, by its TOML path.
    fn float_fields(&self) -> [(&'static str, f64); 30] {
        let (w, p, b, s, o) = (&self.world, &self.player, &self.bots, &self.steering, &self.orbs);
        [
            ("world.width", w.width),
            ("world.height", w.height),
            ("world.boundary_margin", w.boundary_margin),
            ("player.segment_distance", p.segment_distance),
            ("player.base_speed", p.base_speed),
            ("player.boost_multiplier", p.boost_multiplier),
            ("bots.min_aggressiveness", b.min_aggressiveness),
            ("bots.max_aggressiveness", b.max_aggressiveness),
            ("bots.min_speed", b.min_speed),
            ("bots.max_speed", b.max_speed),
            ("bots.spawn_margin", b.spawn_margin),
            ("steering.wall_margin", s.wall_margin),
            ("steering.wall_weight", s.wall_weight),
            ("steering.player_avoid_radius", s.player_avoid_radius),
            ("steering.player_avoid_weight", s.player_avoid_weight),
            ("steering.bot_avoid_radius", s.bot_avoid_radius),
            ("steering.bot_avoid_weight", s.bot_avoid_weight),
            ("steering.orb_search_radius", s.orb_search_radius),
            ("steering.orb_seek_base", s.orb_seek_base),
            ("steering.orb_seek_weight", s.orb_seek_weight),
            ("steering.hunt_radius", s.hunt_radius),
            ("steering.hunt_length_ratio", s.hunt_length_ratio),
            ("steering.hunt_min_aggressiveness", s.hunt_min_aggressiveness),
            ("steering.hunt_weight", s.hunt_weight),
            ("steering.heading_weight", s.heading_weight),
            ("orbs.collect_radius", o.collect_radius),
            ("orbs.min_size", o.min_size),
            ("orbs.max_size", o.max_size),
            ("orbs.pulse_speed", o.pulse_speed),
            ("collision.radius", self.collision.radius),
        ]
    }
}

/// Frame loop and episode settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Tick interval in milliseconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Fixed RNG seed; entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Episodes to play before the runner exits (0 = forever).
    #[serde(default)]
    pub episodes: u32,
    /// Pause between player death and the next episode.
    #[serde(default = "default_restart_delay")]
    pub restart_delay_ms: u64,
    /// Name shown for the player on the leaderboard.
    #[serde(default = "default_player_name")]
    pub player_name: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            seed: None,
            episodes: 0,
            restart_delay_ms: default_restart_delay(),
            player_name: default_player_name(),
        }
    }
}

fn default_tick_interval() -> u64 {
    16
}
fn default_restart_delay() -> u64 {
    2000
}
fn default_player_name() -> String {
    "You".to_string()
}

/// World bounds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorldConfig {
    #[serde(default = "default_world_size")]
    pub width: f64,
    #[serde(default = "default_world_size")]
    pub height: f64,
    /// Heads closer than this to a wall die.
    #[serde(default = "default_boundary_margin")]
    pub boundary_margin: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_world_size(),
            height: default_world_size(),
            boundary_margin: default_boundary_margin(),
        }
    }
}

fn default_world_size() -> f64 {
    4000.0
}
fn default_boundary_margin() -> f64 {
    20.0
}

/// Player chain and power-up settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default = "default_initial_length")]
    pub initial_length: usize,
    /// Maximum gap between consecutive chain points.
    #[serde(default = "default_segment_distance")]
    pub segment_distance: f64,
    /// Distance the head advances per tick.
    #[serde(default = "default_base_speed")]
    pub base_speed: f64,
    #[serde(default = "default_boost_multiplier")]
    pub boost_multiplier: f64,
    #[serde(default = "default_boost_duration")]
    pub boost_duration_ms: u64,
    #[serde(default = "default_boost_cooldown")]
    pub boost_cooldown_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_length: default_initial_length(),
            segment_distance: default_segment_distance(),
            base_speed: default_base_speed(),
            boost_multiplier: default_boost_multiplier(),
            boost_duration_ms: default_boost_duration(),
            boost_cooldown_ms: default_boost_cooldown(),
        }
    }
}

fn default_initial_length() -> usize {
    8
}
fn default_segment_distance() -> f64 {
    12.0
}
fn default_base_speed() -> f64 {
    3.0
}
fn default_boost_multiplier() -> f64 {
    2.0
}
fn default_boost_duration() -> u64 {
    3000
}
fn default_boost_cooldown() -> u64 {
    8000
}

/// Bot population settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    #[serde(default = "default_bot_count")]
    pub count: usize,
    #[serde(default = "default_min_aggressiveness")]
    pub min_aggressiveness: f64,
    #[serde(default = "default_max_aggressiveness")]
    pub max_aggressiveness: f64,
    #[serde(default = "default_bot_min_speed")]
    pub min_speed: f64,
    #[serde(default = "default_bot_max_speed")]
    pub max_speed: f64,
    /// Bots spawn at least this far from any wall.
    #[serde(default = "default_spawn_margin")]
    pub spawn_margin: f64,
    #[serde(default = "default_wander_min")]
    pub wander_min_ms: u64,
    #[serde(default = "default_wander_max")]
    pub wander_max_ms: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            count: default_bot_count(),
            min_aggressiveness: default_min_aggressiveness(),
            max_aggressiveness: default_max_aggressiveness(),
            min_speed: default_bot_min_speed(),
            max_speed: default_bot_max_speed(),
            spawn_margin: default_spawn_margin(),
            wander_min_ms: default_wander_min(),
            wander_max_ms: default_wander_max(),
        }
    }
}

fn default_bot_count() -> usize {
    8
}
fn default_min_aggressiveness() -> f64 {
    0.3
}
fn default_max_aggressiveness() -> f64 {
    1.0
}
fn default_bot_min_speed() -> f64 {
    2.0
}
fn default_bot_max_speed() -> f64 {
    3.0
}
fn default_spawn_margin() -> f64 {
    200.0
}
fn default_wander_min() -> u64 {
    1000
}
fn default_wander_max() -> u64 {
    3000
}

/// Steering force radii and weights.
///
/// Avoidance weights are scaled by `1 - aggressiveness`, seeking and hunting by
/// `aggressiveness`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SteeringConfig {
    #[serde(default = "default_wall_margin")]
    pub wall_margin: f64,
    #[serde(default = "default_wall_weight")]
    pub wall_weight: f64,
    #[serde(default = "default_player_avoid_radius")]
    pub player_avoid_radius: f64,
    #[serde(default = "default_player_avoid_weight")]
    pub player_avoid_weight: f64,
    #[serde(default = "default_bot_avoid_radius")]
    pub bot_avoid_radius: f64,
    #[serde(default = "default_bot_avoid_weight")]
    pub bot_avoid_weight: f64,
    #[serde(default = "default_orb_search_radius")]
    pub orb_search_radius: f64,
    #[serde(default = "default_orb_seek_base")]
    pub orb_seek_base: f64,
    #[serde(default = "default_orb_seek_weight")]
    pub orb_seek_weight: f64,
    #[serde(default = "default_hunt_radius")]
    pub hunt_radius: f64,
    /// Bot must be longer than this fraction of the player to hunt.
    #[serde(default = "default_hunt_length_ratio")]
    pub hunt_length_ratio: f64,
    #[serde(default = "default_hunt_min_aggressiveness")]
    pub hunt_min_aggressiveness: f64,
    #[serde(default = "default_hunt_weight")]
    pub hunt_weight: f64,
    /// Weight of the carried-over heading.
    #[serde(default = "default_heading_weight")]
    pub heading_weight: f64,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            wall_margin: default_wall_margin(),
            wall_weight: default_wall_weight(),
            player_avoid_radius: default_player_avoid_radius(),
            player_avoid_weight: default_player_avoid_weight(),
            bot_avoid_radius: default_bot_avoid_radius(),
            bot_avoid_weight: default_bot_avoid_weight(),
            orb_search_radius: default_orb_search_radius(),
            orb_seek_base: default_orb_seek_base(),
            orb_seek_weight: default_orb_seek_weight(),
            hunt_radius: default_hunt_radius(),
            hunt_length_ratio: default_hunt_length_ratio(),
            hunt_min_aggressiveness: default_hunt_min_aggressiveness(),
            hunt_weight: default_hunt_weight(),
            heading_weight: default_heading_weight(),
        }
    }
}

fn default_wall_margin() -> f64 {
    80.0
}
fn default_wall_weight() -> f64 {
    4.0
}
fn default_player_avoid_radius() -> f64 {
    50.0
}
fn default_player_avoid_weight() -> f64 {
    3.0
}
fn default_bot_avoid_radius() -> f64 {
    40.0
}
fn default_bot_avoid_weight() -> f64 {
    2.0
}
fn default_orb_search_radius() -> f64 {
    250.0
}
fn default_orb_seek_base() -> f64 {
    0.5
}
fn default_orb_seek_weight() -> f64 {
    0.8
}
fn default_hunt_radius() -> f64 {
    150.0
}
fn default_hunt_length_ratio() -> f64 {
    0.8
}
fn default_hunt_min_aggressiveness() -> f64 {
    0.6
}
fn default_hunt_weight() -> f64 {
    1.5
}
fn default_heading_weight() -> f64 {
    1.0
}

/// Orb economy settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrbConfig {
    /// Target population of regular orbs.
    #[serde(default = "default_orb_count")]
    pub count: usize,
    #[serde(default = "default_collect_radius")]
    pub collect_radius: f64,
    #[serde(default = "default_death_orb_value")]
    pub death_orb_value: i64,
    #[serde(default = "default_orb_min_size")]
    pub min_size: f64,
    #[serde(default = "default_orb_max_size")]
    pub max_size: f64,
    /// Pulse phase advance per millisecond.
    #[serde(default = "default_pulse_speed")]
    pub pulse_speed: f64,
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            count: default_orb_count(),
            collect_radius: default_collect_radius(),
            death_orb_value: default_death_orb_value(),
            min_size: default_orb_min_size(),
            max_size: default_orb_max_size(),
            pulse_speed: default_pulse_speed(),
        }
    }
}

fn default_orb_count() -> usize {
    500
}
fn default_collect_radius() -> f64 {
    15.0
}
fn default_death_orb_value() -> i64 {
    2
}
fn default_orb_min_size() -> f64 {
    3.0
}
fn default_orb_max_size() -> f64 {
    6.0
}
fn default_pulse_speed() -> f64 {
    0.003
}

/// Head-to-body collision settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollisionConfig {
    #[serde(default = "default_collision_radius")]
    pub radius: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            radius: default_collision_radius(),
        }
    }
}

fn default_collision_radius() -> f64 {
    15.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.world.width, 4000.0);
        assert_eq!(config.player.initial_length, 8);
        assert_eq!(config.bots.count, 8);
        assert_eq!(config.orbs.count, 500);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [bots]
            count = 3

            [world]
            width = 1000.0
            "#,
        )
        .unwrap();
        assert_eq!(config.bots.count, 3);
        assert_eq!(config.world.width, 1000.0);
        assert_eq!(config.world.height, 4000.0);
        assert_eq!(config.player.segment_distance, 12.0);
    }

    #[test]
    fn test_rejects_inverted_aggressiveness() {
        let mut config = Config::default();
        config.bots.min_aggressiveness = 0.9;
        config.bots.max_aggressiveness = 0.4;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Aggressiveness { .. })
        ));
    }

    #[test]
    fn test_rejects_tiny_world() {
        let mut config = Config::default();
        config.world.width = 30.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WorldTooSmall { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let config: Config = toml::from_str("[world]\nwidth = inf").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "world.width",
                value: f64::INFINITY
            })
        );

        let mut config = Config::default();
        config.bots.max_speed = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "bots.max_speed", .. })
        ));

        let mut config = Config::default();
        config.orbs.max_size = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "orbs.max_size", .. })
        ));

        let mut config = Config::default();
        config.steering.hunt_weight = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "steering.hunt_weight", .. })
        ));
    }

    #[test]
    fn test_load_from_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.collision.radius, 15.0);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.orbs.count, config.orbs.count);
    }
}
