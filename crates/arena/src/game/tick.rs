//! The per-frame driver.
//!
//! Phase order is fixed: player input and movement, player collisions, player
//! relaxation, bot steering and movement, bot deaths, respawns, orb pickup,
//! timers, derived state. Each phase reads what the previous one wrote.

use super::{Arena, GameOver, TickOutcome};
use crate::ai::steering::{self, Surroundings};
use crate::collision;
use crate::entity::Snake;
use crate::leaderboard;
use crate::world::Pickup;
use protocol::{ArenaEvent, DeathCause, EntityId, FinalScore, FrameInput, PLAYER_ID};
use tracing::{debug, info};

/// Particles per orb pickup.
const PICKUP_PARTICLES: u32 = 6;
/// Particles per death.
const DEATH_PARTICLES: u32 = 24;

impl Arena {
    /// Run one frame. Does nothing unless an episode is running.
    pub fn tick(&mut self, input: &FrameInput, dt_ms: u64) -> TickOutcome {
        let mut out = TickOutcome::default();
        if !self.is_running() {
            return out;
        }
        self.tick_count += 1;
        self.now_ms += dt_ms;

        if input.boost {
            self.activate_boost();
        }

        // 1-2. Player movement, boundary, head into bots.
        self.move_player(input);
        self.check_player_collisions(&mut out);

        // 3.
        self.player.chain.relax(self.config.player.segment_distance);

        // 4-6. Bots.
        self.update_bots();
        self.remove_dead_bots(&mut out);
        self.respawn_bots(&mut out);

        // 7-9.
        self.collect_orbs(&mut out);
        self.advance_timers(dt_ms);
        self.refresh_derived();

        out
    }

    /// Start the speed boost if it is idle. Returns whether it started.
    pub fn activate_boost(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let duration = self.config.player.boost_duration_ms;
        let started = self.player.boost_mut().is_some_and(|b| b.activate(duration));
        if started {
            debug!("Boost activated for {}ms", duration);
        } else {
            debug!("Boost activation ignored: {:?}", self.player.boost());
        }
        started
    }

    fn move_player(&mut self, input: &FrameInput) {
        match input.checked_pointer() {
            Ok(_) => {
                if let Some(dir) = input.heading() {
                    self.player.direction = dir.y.atan2(dir.x);
                }
            }
            Err(e) => debug!("Ignoring pointer input this tick: {}", e),
        }

        let p = &self.config.player;
        let speed = self.player.step_speed(p.base_speed, p.boost_multiplier);
        self.player.chain.advance_head(self.player.direction, speed);
    }

    fn check_player_collisions(&mut self, out: &mut TickOutcome) {
        let head = self.player.chain.head();
        if collision::boundary_violation(head, &self.bounds, self.config.world.boundary_margin) {
            self.kill_player(DeathCause::Boundary, out);
            return;
        }

        let hit = collision::player_hit_bot(&self.player.chain, &self.bots.bots, self.config.collision.radius)
            .map(|bot| DeathCause::Bot {
                id: bot.id,
                name: bot.name.clone(),
            });
        if let Some(cause) = hit {
            self.kill_player(cause, out);
        }
    }

    /// Freeze the episode and hand out the final score, once.
    fn kill_player(&mut self, cause: DeathCause, out: &mut TickOutcome) {
        if !self.player_alive {
            return;
        }
        self.player_alive = false;

        let board = leaderboard::generate(Some(&self.player), &self.bots.bots);
        let rank = leaderboard::player_rank(&board).unwrap_or(board.len());
        let score = self.player.score;

        info!("Player died ({:?}) with score {} at rank {}", cause, score, rank);
        out.events.push(ArenaEvent::PlayerDied {
            cause: cause.clone(),
            score,
            rank,
        });
        out.events.push(ArenaEvent::ParticleBurst {
            position: self.player.chain.head(),
            color: self.player.color,
            count: DEATH_PARTICLES,
        });
        self.game_over = Some(GameOver { cause, score, rank });

        if !self.score_submitted {
            self.score_submitted = true;
            out.final_score = Some(FinalScore { score });
        }
    }

    fn update_bots(&mut self) {
        let player = self.player_alive.then_some(&self.player.chain);
        let wander_range = (self.config.bots.wander_min_ms, self.config.bots.wander_max_ms);
        let segment = self.config.player.segment_distance;

        for i in 0..self.bots.bots.len() {
            steering::wander(&mut self.bots.bots[i], self.now_ms, wander_range, &mut self.rng);

            let surroundings = Surroundings {
                bounds: &self.bounds,
                player,
                bots: &self.bots.bots,
                orbs: &self.orbs,
            };
            let heading = steering::steer(i, &surroundings, &self.config.steering);

            let bot = &mut self.bots.bots[i];
            bot.direction = heading;
            let speed = bot.traits().map(|t| t.step_speed()).unwrap_or(0.0);
            bot.step(speed, segment);
        }
    }

    fn remove_dead_bots(&mut self, out: &mut TickOutcome) {
        let deaths = collision::detect_bot_deaths(
            &self.bots.bots,
            self.player_alive.then_some(&self.player.chain),
            &self.bounds,
            self.config.world.boundary_margin,
            self.config.collision.radius,
        );
        if deaths.is_empty() {
            return;
        }

        let indices: Vec<usize> = deaths.iter().map(|d| d.index).collect();
        let removed = self.bots.remove_indices(&indices);

        for (bot, death) in removed.into_iter().zip(deaths) {
            let orbs = self
                .orbs
                .scatter(&bot.chain, bot.color, self.config.orbs.death_orb_value, &mut self.rng);
            debug!(
                "Bot {} '{}' died ({:?}), length {}, left {} death orbs",
                bot.id,
                bot.name,
                death.cause,
                bot.len(),
                orbs
            );
            let position = bot.chain.head();
            out.events.push(ArenaEvent::BotDied {
                id: bot.id,
                name: bot.name,
                cause: death.cause,
                position,
                length: bot.chain.len(),
            });
            out.events.push(ArenaEvent::ParticleBurst {
                position,
                color: bot.color,
                count: DEATH_PARTICLES,
            });
        }
    }

    fn respawn_bots(&mut self, out: &mut TickOutcome) {
        let spawned = self
            .bots
            .fill(self.config.bots.count, &self.config, &self.bounds, self.now_ms, &mut self.rng);
        for id in spawned {
            if let Some(bot) = self.bots.get_bot(id) {
                debug!("Bot {} '{}' spawned (aggressiveness {:.2})", id, bot.name, bot.aggressiveness());
                out.events.push(ArenaEvent::BotSpawned {
                    id,
                    name: bot.name.clone(),
                });
            }
        }
    }

    /// Player first, then bots in population order; the first head to reach
    /// an orb takes it.
    fn collect_orbs(&mut self, out: &mut TickOutcome) {
        let radius = self.config.orbs.collect_radius;
        let segment = self.config.player.segment_distance;

        if self.player_alive {
            let picked = self.orbs.collect(self.player.chain.head(), radius);
            credit(&mut self.player, PLAYER_ID, &picked, segment, out);
        }
        for bot in &mut self.bots.bots {
            let picked = self.orbs.collect(bot.chain.head(), radius);
            let id = bot.id;
            credit(bot, id, &picked, segment, out);
        }

        self.orbs.replenish(
            self.config.orbs.count,
            &self.bounds,
            (self.config.orbs.min_size, self.config.orbs.max_size),
            &mut self.rng,
        );
    }

    fn advance_timers(&mut self, dt_ms: u64) {
        self.orbs.pulse(dt_ms as f64 * self.config.orbs.pulse_speed);
        let cooldown = self.config.player.boost_cooldown_ms;
        if let Some(boost) = self.player.boost_mut() {
            boost.advance(dt_ms, cooldown);
        }
    }
}

fn credit(
    snake: &mut Snake,
    id: EntityId,
    picked: &[Pickup],
    segment: f64,
    out: &mut TickOutcome,
) {
    for pickup in picked {
        snake.consume(pickup.value, segment);
        out.events.push(ArenaEvent::OrbCollected {
            collector: id,
            position: pickup.position,
            value: pickup.value,
        });
        out.events.push(ArenaEvent::ParticleBurst {
            position: pickup.position,
            color: pickup.color,
            count: PICKUP_PARTICLES,
        });
    }
}
