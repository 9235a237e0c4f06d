//! Bot population.

use crate::config::Config;
use crate::entity::{BotTraits, Chain, Snake};
use crate::world::{WorldBounds, random_color};
use protocol::EntityId;
use rand::Rng;
use std::f64::consts::TAU;

use super::steering::random_interval;

/// Bot names to use.
const BOT_NAMES: &[&str] = &[
    "Viper", "Cobra", "Mamba", "Python", "Adder", "Krait", "Boa", "Asp",
    "Taipan", "Racer", "Slither", "Noodle", "Wiggle", "Sidewinder", "Coil", "Fang",
];

/// Owns every living bot, in population order.
#[derive(Debug, Default)]
pub struct BotManager {
    /// Living bots. Iteration order decides collision and pickup priority.
    pub bots: Vec<Snake>,
    /// Next bot ID counter.
    next_id: EntityId,
}

impl BotManager {
    /// Create an empty population. Bot ids start at 1; 0 is the player.
    pub fn new() -> Self {
        Self {
            bots: Vec::new(),
            next_id: 1,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }

    /// Spawn a fresh bot at a random position and return its id.
    pub fn spawn(&mut self, config: &Config, bounds: &WorldBounds, now_ms: u64, rng: &mut impl Rng) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;

        let name = format!("{}{}", BOT_NAMES[rng.random_range(0..BOT_NAMES.len())], id % 100);
        let direction = rng.random_range(0.0..TAU);
        let head = bounds.random_position(rng, config.bots.spawn_margin);
        let chain = Chain::straight(
            head,
            direction,
            config.player.initial_length,
            config.player.segment_distance,
        );

        let b = &config.bots;
        let traits = BotTraits {
            speed: rng.random_range(b.min_speed..=b.max_speed),
            aggressiveness: rng.random_range(b.min_aggressiveness..=b.max_aggressiveness),
            last_direction_change_ms: now_ms,
            wander_interval_ms: random_interval((b.wander_min_ms, b.wander_max_ms), rng),
        };

        self.bots.push(Snake::bot(id, name, random_color(rng), chain, direction, traits));
        id
    }

    /// Spawn until the population reaches `target`, returning the new ids.
    pub fn fill(
        &mut self,
        target: usize,
        config: &Config,
        bounds: &WorldBounds,
        now_ms: u64,
        rng: &mut impl Rng,
    ) -> Vec<EntityId> {
        let mut spawned = Vec::new();
        while self.bots.len() < target {
            spawned.push(self.spawn(config, bounds, now_ms, rng));
        }
        spawned
    }

    /// Remove the bots at `indices`, returning them in population order.
    pub fn remove_indices(&mut self, indices: &[usize]) -> Vec<Snake> {
        let mut removed = Vec::with_capacity(indices.len());
        let mut index = 0;
        self.bots.retain(|bot| {
            let keep = !indices.contains(&index);
            index += 1;
            if !keep {
                removed.push(bot.clone());
            }
            keep
        });
        removed
    }

    /// Get a bot by ID.
    pub fn get_bot(&self, id: EntityId) -> Option<&Snake> {
        self.bots.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fill_reaches_target_with_unique_ids() {
        let config = Config::default();
        let bounds = WorldBounds::new(config.world.width, config.world.height);
        let mut rng = StdRng::seed_from_u64(11);
        let mut manager = BotManager::new();

        let ids = manager.fill(8, &config, &bounds, 0, &mut rng);
        assert_eq!(ids.len(), 8);
        assert_eq!(manager.len(), 8);
        assert!(manager.bots.iter().all(|b| {
            let a = b.aggressiveness();
            (0.3..=1.0).contains(&a) && b.len() == config.player.initial_length
        }));
        assert!(manager.get_bot(0).is_none());
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let config = Config::default();
        let bounds = WorldBounds::new(config.world.width, config.world.height);
        let mut rng = StdRng::seed_from_u64(5);
        let mut manager = BotManager::new();
        manager.fill(3, &config, &bounds, 0, &mut rng);

        let removed = manager.remove_indices(&[0, 2]);
        assert_eq!(removed.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(manager.len(), 1);

        let new_ids = manager.fill(3, &config, &bounds, 0, &mut rng);
        assert_eq!(new_ids, vec![4, 5]);
    }
}
