//! Steering engine for bots.
//!
//! A bot's heading is the angle of a weighted sum of forces: wall avoidance,
//! player avoidance, bot avoidance, orb seeking, hunting and the carried-over
//! heading. There are no discrete AI states; hunting simply switches on when
//! its gate is met.

use crate::config::SteeringConfig;
use crate::entity::{Chain, Snake};
use crate::world::{OrbField, WorldBounds};
use protocol::Point;
use rand::Rng;
use std::f64::consts::PI;

/// Below this total force the previous heading is kept.
const MIN_FORCE: f64 = 1e-6;

/// What a bot can see of the rest of the world this tick.
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    pub bounds: &'a WorldBounds,
    /// Player chain, `None` once the player is dead.
    pub player: Option<&'a Chain>,
    pub bots: &'a [Snake],
    pub orbs: &'a OrbField,
}

/// Individual steering contributions, kept apart for inspection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringForces {
    pub walls: Point,
    pub player_avoid: Point,
    pub bot_avoid: Point,
    pub orb_seek: Point,
    pub hunt: Point,
    pub heading: Point,
}

impl SteeringForces {
    #[inline]
    pub fn total(&self) -> Point {
        self.walls + self.player_avoid + self.bot_avoid + self.orb_seek + self.hunt + self.heading
    }

    /// Heading of the summed force, or `fallback` when it is near zero.
    pub fn heading_or(&self, fallback: f64) -> f64 {
        let total = self.total();
        if total.length_squared() > MIN_FORCE * MIN_FORCE && total.is_finite() {
            total.y.atan2(total.x)
        } else {
            fallback
        }
    }
}

/// Compute every steering force for the bot at `index`.
pub fn compute_forces(index: usize, world: &Surroundings<'_>, cfg: &SteeringConfig) -> SteeringForces {
    let me = &world.bots[index];
    let head = me.chain.head();
    let aggr = me.aggressiveness();
    let caution = 1.0 - aggr;

    let mut forces = SteeringForces {
        heading: Point::new(me.direction.cos(), me.direction.sin()) * cfg.heading_weight,
        ..Default::default()
    };

    forces.walls = wall_force(head, world.bounds, cfg.wall_margin) * (caution * cfg.wall_weight);

    if let Some(player) = world.player {
        // Only the front third of the player is worth dodging.
        let front = player.len().div_ceil(3).max(1);
        forces.player_avoid = repulsion(head, &player.points()[..front.min(player.len())], cfg.player_avoid_radius)
            * (caution * cfg.player_avoid_weight);

        let hunt_gate = me.len() as f64 > cfg.hunt_length_ratio * player.len() as f64
            && aggr > cfg.hunt_min_aggressiveness;
        if hunt_gate {
            let to_player = player.head() - head;
            let dist = to_player.length();
            if dist < cfg.hunt_radius && dist > 0.0 {
                forces.hunt = to_player / dist * (aggr * cfg.hunt_weight);
            }
        }
    }

    let mut bot_push = Point::ZERO;
    for (j, other) in world.bots.iter().enumerate() {
        if j != index {
            bot_push += repulsion(head, other.chain.points(), cfg.bot_avoid_radius);
        }
    }
    forces.bot_avoid = bot_push * (caution * cfg.bot_avoid_weight);

    if let Some(target) = world.orbs.nearest_within(head, cfg.orb_search_radius) {
        let to_orb = target - head;
        let dist = to_orb.length();
        if dist > 0.0 {
            forces.orb_seek = to_orb / dist * (cfg.orb_seek_base + aggr * cfg.orb_seek_weight);
        }
    }

    forces
}

/// Heading for the bot at `index`, keeping its current direction when the
/// forces cancel out.
pub fn steer(index: usize, world: &Surroundings<'_>, cfg: &SteeringConfig) -> f64 {
    let forces = compute_forces(index, world, cfg);
    forces.heading_or(world.bots[index].direction)
}

/// Periodically nudge a bot's heading by a random offset.
///
/// Returns true when a nudge happened.
pub fn wander(bot: &mut Snake, now_ms: u64, interval_range: (u64, u64), rng: &mut impl Rng) -> bool {
    let direction = bot.direction;
    let Some(traits) = bot.traits_mut() else {
        return false;
    };
    if now_ms.saturating_sub(traits.last_direction_change_ms) < traits.wander_interval_ms {
        return false;
    }
    let scale = 0.3 + traits.aggressiveness * 0.4;
    let offset = rng.random_range(-1.0..1.0) * PI * scale;
    traits.last_direction_change_ms = now_ms;
    traits.wander_interval_ms = random_interval(interval_range, rng);
    bot.direction = direction + offset;
    true
}

/// Uniform interval in `[min, max]` milliseconds.
pub fn random_interval((min, max): (u64, u64), rng: &mut impl Rng) -> u64 {
    if max > min { rng.random_range(min..=max) } else { min }
}

/// Push away from each wall, proportional to how far inside `margin` the
/// point is.
fn wall_force(p: Point, bounds: &WorldBounds, margin: f64) -> Point {
    if margin <= 0.0 {
        return Point::ZERO;
    }
    let mut force = Point::ZERO;
    if p.x < margin {
        force.x += (margin - p.x) / margin;
    }
    if p.x > bounds.width - margin {
        force.x -= (p.x - (bounds.width - margin)) / margin;
    }
    if p.y < margin {
        force.y += (margin - p.y) / margin;
    }
    if p.y > bounds.height - margin {
        force.y -= (p.y - (bounds.height - margin)) / margin;
    }
    force
}

/// Sum of pushes away from every point within `radius`, stronger when closer.
fn repulsion(from: Point, points: &[Point], radius: f64) -> Point {
    let mut force = Point::ZERO;
    for &p in points {
        let away = from - p;
        let dist = away.length();
        if dist > 0.0 && dist < radius {
            force += away / dist * ((radius - dist) / radius);
        }
    }
    force
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::BotTraits;
    use protocol::Color;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bot(id: u32, head: Point, heading: f64, length: usize, aggressiveness: f64) -> Snake {
        Snake::bot(
            id,
            format!("Bot{}", id),
            Color::default(),
            Chain::straight(head, heading, length, 12.0),
            heading,
            BotTraits {
                speed: 2.0,
                aggressiveness,
                last_direction_change_ms: 0,
                wander_interval_ms: 1000,
            },
        )
    }

    fn world<'a>(
        bounds: &'a WorldBounds,
        player: Option<&'a Chain>,
        bots: &'a [Snake],
        orbs: &'a OrbField,
    ) -> Surroundings<'a> {
        Surroundings {
            bounds,
            player,
            bots,
            orbs,
        }
    }

    #[test]
    fn test_hunting_pulls_toward_player() {
        let bounds = WorldBounds::new(4000.0, 4000.0);
        let orbs = OrbField::new();
        let player = Chain::straight(Point::new(2100.0, 2000.0), 0.0, 8, 12.0);
        // Facing straight up, player 100 units to the right.
        let bots = vec![bot(1, Point::new(2000.0, 2000.0), -PI / 2.0, 12, 0.9)];
        let cfg = SteeringConfig::default();

        let forces = compute_forces(0, &world(&bounds, Some(&player), &bots, &orbs), &cfg);
        assert!(forces.hunt.x > 0.0);
        assert!(forces.hunt.y.abs() < 1e-9);

        let heading = forces.heading_or(0.0);
        assert!(heading.cos() > 0.0, "heading {} should lean toward the player", heading);
    }

    #[test]
    fn test_no_hunting_when_timid_or_short() {
        let bounds = WorldBounds::new(4000.0, 4000.0);
        let orbs = OrbField::new();
        let player = Chain::straight(Point::new(2100.0, 2000.0), 0.0, 8, 12.0);
        let cfg = SteeringConfig::default();

        let timid = vec![bot(1, Point::new(2000.0, 2000.0), 0.0, 12, 0.5)];
        let forces = compute_forces(0, &world(&bounds, Some(&player), &timid, &orbs), &cfg);
        assert_eq!(forces.hunt, Point::ZERO);

        let short = vec![bot(1, Point::new(2000.0, 2000.0), 0.0, 4, 0.9)];
        let forces = compute_forces(0, &world(&bounds, Some(&player), &short, &orbs), &cfg);
        assert_eq!(forces.hunt, Point::ZERO);

        let forces = compute_forces(0, &world(&bounds, None, &timid, &orbs), &cfg);
        assert_eq!(forces.hunt, Point::ZERO);
        assert_eq!(forces.player_avoid, Point::ZERO);
    }

    #[test]
    fn test_wall_avoidance_points_inward() {
        let bounds = WorldBounds::new(4000.0, 4000.0);
        let orbs = OrbField::new();
        let bots = vec![bot(1, Point::new(30.0, 3970.0), 0.0, 3, 0.3)];
        let forces = compute_forces(0, &world(&bounds, None, &bots, &orbs), &SteeringConfig::default());
        assert!(forces.walls.x > 0.0);
        assert!(forces.walls.y < 0.0);
    }

    #[test]
    fn test_player_avoid_uses_front_third() {
        let bounds = WorldBounds::new(4000.0, 4000.0);
        let orbs = OrbField::new();
        let player = Chain::straight(Point::new(1000.0, 1000.0), 0.0, 9, 12.0);
        let cfg = SteeringConfig::default();

        // Near the tail: ignored.
        let near_tail = vec![bot(1, Point::new(904.0, 1020.0), 0.0, 3, 0.3)];
        let forces = compute_forces(0, &world(&bounds, Some(&player), &near_tail, &orbs), &cfg);
        assert_eq!(forces.player_avoid, Point::ZERO);

        // Near the head: pushed away (downward).
        let near_head = vec![bot(1, Point::new(1000.0, 1020.0), 0.0, 3, 0.3)];
        let forces = compute_forces(0, &world(&bounds, Some(&player), &near_head, &orbs), &cfg);
        assert!(forces.player_avoid.y > 0.0);
    }

    #[test]
    fn test_orb_seek_and_bot_avoid() {
        let bounds = WorldBounds::new(4000.0, 4000.0);
        let mut orbs = OrbField::new();
        orbs.orbs.push(protocol::Orb {
            position: Point::new(1000.0, 1200.0),
            color: Color::default(),
            size: 4.0,
            pulse_phase: 0.0,
        });
        let bots = vec![
            bot(1, Point::new(1000.0, 1000.0), 0.0, 3, 0.5),
            bot(2, Point::new(1000.0, 970.0), 0.0, 3, 0.5),
        ];
        let forces = compute_forces(0, &world(&bounds, None, &bots, &orbs), &SteeringConfig::default());
        assert!(forces.orb_seek.y > 0.0);
        assert!(forces.bot_avoid.y > 0.0);
    }

    #[test]
    fn test_zero_force_keeps_heading() {
        let forces = SteeringForces::default();
        assert_eq!(forces.heading_or(1.25), 1.25);
    }

    #[test]
    fn test_wander_respects_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut snake = bot(1, Point::new(500.0, 500.0), 0.0, 3, 0.5);
        assert!(!wander(&mut snake, 500, (1000, 3000), &mut rng));
        assert_eq!(snake.direction, 0.0);

        assert!(wander(&mut snake, 1000, (1000, 3000), &mut rng));
        let traits = snake.traits().unwrap();
        assert_eq!(traits.last_direction_change_ms, 1000);
        assert!((1000..=3000).contains(&traits.wander_interval_ms));
        assert!(snake.direction.abs() <= PI * 0.5 + 1e-9);
    }
}
