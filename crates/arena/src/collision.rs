//! Collision detection.
//!
//! Two primitives: a head crossing the world margin, and a head touching any
//! point of another chain. Bot deaths are resolved in population order; a bot
//! already marked dead is neither checked again nor able to kill.

use crate::entity::{Chain, Snake};
use crate::world::WorldBounds;
use protocol::{DeathCause, Point};

/// True when `point` lies within `margin` of any wall (or outside the world).
#[inline]
pub fn boundary_violation(point: Point, bounds: &WorldBounds, margin: f64) -> bool {
    point.x < margin
        || point.x > bounds.width - margin
        || point.y < margin
        || point.y > bounds.height - margin
}

/// True when `head` is closer than `radius` to any point of `body`.
#[inline]
pub fn head_hits(head: Point, body: &Chain, radius: f64) -> bool {
    let r2 = radius * radius;
    body.points().iter().any(|p| p.distance_squared(head) < r2)
}

/// True when the head of `a` touches any point of `b`.
#[inline]
pub fn chain_head_hits(a: &Chain, b: &Chain, radius: f64) -> bool {
    !a.is_empty() && head_hits(a.head(), b, radius)
}

/// First bot (population order) whose body the player's head touches.
pub fn player_hit_bot<'a>(player: &Chain, bots: &'a [Snake], radius: f64) -> Option<&'a Snake> {
    bots.iter().find(|bot| chain_head_hits(player, &bot.chain, radius))
}

/// Death found for a bot this tick.
#[derive(Debug, Clone, PartialEq)]
pub struct BotDeath {
    /// Index into the bot list at detection time.
    pub index: usize,
    pub cause: DeathCause,
}

/// Find every bot that dies this tick.
///
/// Checks, in order: boundary, player body (only while `player` is alive),
/// then the bodies of other bots not yet marked. The first condition found
/// marks the bot; later bots cannot be killed by a marked one.
pub fn detect_bot_deaths(
    bots: &[Snake],
    player: Option<&Chain>,
    bounds: &WorldBounds,
    margin: f64,
    radius: f64,
) -> Vec<BotDeath> {
    let mut marked = vec![false; bots.len()];
    let mut deaths = Vec::new();

    for (i, bot) in bots.iter().enumerate() {
        if marked[i] || bot.is_empty() {
            continue;
        }
        let head = bot.chain.head();

        let cause = if boundary_violation(head, bounds, margin) {
            Some(DeathCause::Boundary)
        } else if player.is_some_and(|p| head_hits(head, p, radius)) {
            Some(DeathCause::Player)
        } else {
            bots.iter()
                .enumerate()
                .find(|&(j, other)| j != i && !marked[j] && head_hits(head, &other.chain, radius))
                .map(|(_, killer)| DeathCause::Bot {
                    id: killer.id,
                    name: killer.name.clone(),
                })
        };

        if let Some(cause) = cause {
            marked[i] = true;
            deaths.push(BotDeath { index: i, cause });
        }
    }

    deaths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::BotTraits;
    use protocol::Color;

    fn bot_at(id: u32, x: f64, y: f64, heading: f64) -> Snake {
        Snake::bot(
            id,
            format!("Bot{}", id),
            Color::default(),
            Chain::straight(Point::new(x, y), heading, 5, 12.0),
            heading,
            BotTraits {
                speed: 2.0,
                aggressiveness: 0.5,
                last_direction_change_ms: 0,
                wander_interval_ms: 1000,
            },
        )
    }

    #[test]
    fn test_boundary_violation() {
        let bounds = WorldBounds::new(4000.0, 4000.0);
        assert!(boundary_violation(Point::new(5.0, 2000.0), &bounds, 20.0));
        assert!(boundary_violation(Point::new(2000.0, 3990.0), &bounds, 20.0));
        assert!(!boundary_violation(Point::new(20.0, 20.0), &bounds, 20.0));
        assert!(!boundary_violation(Point::new(2000.0, 2000.0), &bounds, 20.0));
    }

    #[test]
    fn test_head_hits_radius_is_strict() {
        let body = Chain::from_points(vec![Point::new(15.0, 0.0)]);
        assert!(!head_hits(Point::ZERO, &body, 15.0));
        assert!(head_hits(Point::new(0.1, 0.0), &body, 15.0));
    }

    #[test]
    fn test_player_hit_bot_reports_first() {
        let player = Chain::straight(Point::new(100.0, 100.0), 0.0, 3, 12.0);
        let bots = vec![bot_at(1, 900.0, 900.0, 0.0), bot_at(2, 110.0, 100.0, 0.0)];
        let hit = player_hit_bot(&player, &bots, 15.0).map(|b| b.id);
        assert_eq!(hit, Some(2));
    }

    #[test]
    fn test_head_on_pair_kills_only_first() {
        let bounds = WorldBounds::new(4000.0, 4000.0);
        let bots = vec![
            bot_at(1, 1000.0, 1000.0, 0.0),
            bot_at(2, 1008.0, 1000.0, std::f64::consts::PI),
        ];
        let deaths = detect_bot_deaths(&bots, None, &bounds, 20.0, 15.0);
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths[0].index, 0);
        assert_eq!(
            deaths[0].cause,
            DeathCause::Bot {
                id: 2,
                name: "Bot2".to_string()
            }
        );
    }

    #[test]
    fn test_bot_into_player_body() {
        let bounds = WorldBounds::new(4000.0, 4000.0);
        let player = Chain::straight(Point::new(500.0, 500.0), 0.0, 8, 12.0);
        let bots = vec![bot_at(3, 470.0, 505.0, 0.0)];
        let deaths = detect_bot_deaths(&bots, Some(&player), &bounds, 20.0, 15.0);
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths[0].cause, DeathCause::Player);

        let deaths = detect_bot_deaths(&bots, None, &bounds, 20.0, 15.0);
        assert!(deaths.is_empty());
    }

    #[test]
    fn test_boundary_checked_first() {
        let bounds = WorldBounds::new(4000.0, 4000.0);
        let bots = vec![bot_at(4, 10.0, 500.0, 0.0)];
        let deaths = detect_bot_deaths(&bots, None, &bounds, 20.0, 15.0);
        assert_eq!(deaths[0].cause, DeathCause::Boundary);
    }
}
