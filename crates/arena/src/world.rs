//! World bounds and the orb economy.
//!
//! Regular orbs are kept at a target population; death orbs appear where a
//! snake died and are never replenished.

use crate::entity::Chain;
use protocol::{Color, DeathOrb, Orb, Point};
use rand::Rng;

/// Rectangular world, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
}

impl WorldBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Random position at least `inset` away from every wall.
    #[inline]
    pub fn random_position(&self, rng: &mut impl Rng, inset: f64) -> Point {
        let inset_x = inset.min(self.width / 2.0 - 1.0).max(0.0);
        let inset_y = inset.min(self.height / 2.0 - 1.0).max(0.0);
        Point::new(
            rng.random_range(inset_x..self.width - inset_x),
            rng.random_range(inset_y..self.height - inset_y),
        )
    }
}

/// Generate a random bright color.
#[inline]
pub fn random_color(rng: &mut impl Rng) -> Color {
    Color::new(
        rng.random_range(50..=255),
        rng.random_range(50..=255),
        rng.random_range(50..=255),
    )
}

/// An orb picked up this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub position: Point,
    pub color: Color,
    pub value: i64,
}

/// All collectibles in the world.
#[derive(Debug, Clone, Default)]
pub struct OrbField {
    pub orbs: Vec<Orb>,
    pub death_orbs: Vec<DeathOrb>,
}

impl OrbField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total orbs of both kinds.
    #[inline]
    pub fn len(&self) -> usize {
        self.orbs.len() + self.death_orbs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spawn regular orbs uniformly until `target` are present.
    pub fn replenish(
        &mut self,
        target: usize,
        bounds: &WorldBounds,
        size_range: (f64, f64),
        rng: &mut impl Rng,
    ) -> usize {
        let missing = target.saturating_sub(self.orbs.len());
        for _ in 0..missing {
            let position = bounds.random_position(rng, 0.0);
            let (min_size, max_size) = size_range;
            let size = if max_size > min_size {
                rng.random_range(min_size..max_size)
            } else {
                min_size
            };
            self.orbs.push(Orb {
                position,
                color: random_color(rng),
                size,
                pulse_phase: rng.random_range(0.0..std::f64::consts::TAU),
            });
        }
        missing
    }

    /// Remove every orb within `radius` of `head`, returning what was picked up.
    ///
    /// Callers process entities in a fixed order; the first head to reach an
    /// orb takes it.
    pub fn collect(&mut self, head: Point, radius: f64) -> Vec<Pickup> {
        let mut picked = Vec::new();
        self.orbs.retain(|orb| {
            if orb.position.distance(head) < radius {
                picked.push(Pickup {
                    position: orb.position,
                    color: orb.color,
                    value: 1,
                });
                false
            } else {
                true
            }
        });
        self.death_orbs.retain(|d| {
            if d.orb.position.distance(head) < radius {
                picked.push(Pickup {
                    position: d.orb.position,
                    color: d.orb.color,
                    value: d.value,
                });
                false
            } else {
                true
            }
        });
        picked
    }

    /// Turn every other segment of a dead chain into a death orb.
    pub fn scatter(&mut self, chain: &Chain, color: Color, value: i64, rng: &mut impl Rng) -> usize {
        let before = self.death_orbs.len();
        for point in chain.alternate_points() {
            let jitter = Point::new(rng.random_range(-4.0..4.0), rng.random_range(-4.0..4.0));
            self.death_orbs.push(DeathOrb {
                orb: Orb {
                    position: point + jitter,
                    color,
                    size: 8.0,
                    pulse_phase: rng.random_range(0.0..std::f64::consts::TAU),
                },
                value,
            });
        }
        self.death_orbs.len() - before
    }

    /// Nearest orb of either kind within `radius` of `from`.
    pub fn nearest_within(&self, from: Point, radius: f64) -> Option<Point> {
        self.orbs
            .iter()
            .map(|o| o.position)
            .chain(self.death_orbs.iter().map(|d| d.orb.position))
            .map(|p| (p, p.distance_squared(from)))
            .filter(|&(_, d2)| d2 <= radius * radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| p)
    }

    /// Advance every orb's pulse animation.
    pub fn pulse(&mut self, delta: f64) {
        let wrap = |phase: f64| (phase + delta) % std::f64::consts::TAU;
        for orb in &mut self.orbs {
            orb.pulse_phase = wrap(orb.pulse_phase);
        }
        for d in &mut self.death_orbs {
            d.orb.pulse_phase = wrap(d.orb.pulse_phase);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn orb_at(x: f64, y: f64) -> Orb {
        Orb {
            position: Point::new(x, y),
            color: Color::new(255, 255, 255),
            size: 4.0,
            pulse_phase: 0.0,
        }
    }

    #[test]
    fn test_replenish_fills_gap() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = WorldBounds::new(1000.0, 500.0);
        let mut field = OrbField::new();
        assert_eq!(field.replenish(50, &bounds, (3.0, 6.0), &mut rng), 50);
        assert_eq!(field.orbs.len(), 50);
        assert!(field.orbs.iter().all(|o| {
            (0.0..1000.0).contains(&o.position.x) && (0.0..500.0).contains(&o.position.y)
        }));
        assert_eq!(field.replenish(50, &bounds, (3.0, 6.0), &mut rng), 0);
    }

    #[test]
    fn test_collect_within_radius_only() {
        let mut field = OrbField::new();
        field.orbs.push(orb_at(10.0, 0.0));
        field.orbs.push(orb_at(30.0, 0.0));
        field.death_orbs.push(DeathOrb {
            orb: orb_at(0.0, 14.0),
            value: 2,
        });

        let picked = field.collect(Point::ZERO, 15.0);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked.iter().map(|p| p.value).sum::<i64>(), 3);
        assert_eq!(field.orbs.len(), 1);
        assert!(field.death_orbs.is_empty());
    }

    #[test]
    fn test_scatter_every_other_segment() {
        let mut rng = StdRng::seed_from_u64(1);
        let chain = Chain::straight(Point::new(200.0, 200.0), 0.0, 9, 12.0);
        let mut field = OrbField::new();
        let made = field.scatter(&chain, Color::new(1, 2, 3), 2, &mut rng);
        assert_eq!(made, 5);
        assert!(field.death_orbs.iter().all(|d| d.value == 2));
    }

    #[test]
    fn test_nearest_within() {
        let mut field = OrbField::new();
        field.orbs.push(orb_at(100.0, 0.0));
        field.orbs.push(orb_at(40.0, 0.0));
        field.orbs.push(orb_at(400.0, 0.0));
        assert_eq!(field.nearest_within(Point::ZERO, 250.0), Some(Point::new(40.0, 0.0)));
        assert_eq!(field.nearest_within(Point::new(2000.0, 0.0), 250.0), None);
    }
}
