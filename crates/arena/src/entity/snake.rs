//! Player and bot snakes.

use super::chain::Chain;
use crate::boost::Boost;
use protocol::{Color, EntityId, PLAYER_ID, SnakeView};

/// Per-bot traits fixed at spawn, plus wander timing.
#[derive(Debug, Clone, PartialEq)]
pub struct BotTraits {
    /// Base distance per tick.
    pub speed: f64,
    /// 0.3..1.0, biases every steering weight.
    pub aggressiveness: f64,
    /// Virtual time of the last wander nudge.
    pub last_direction_change_ms: u64,
    /// Delay until the next wander nudge.
    pub wander_interval_ms: u64,
}

impl BotTraits {
    /// Distance moved per tick, aggressive bots being slightly faster.
    #[inline]
    pub fn step_speed(&self) -> f64 {
        self.speed * (1.0 + self.aggressiveness * 0.2)
    }
}

/// Player-only state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerControl {
    pub boost: Boost,
}

/// Who steers a snake.
#[derive(Debug, Clone, PartialEq)]
pub enum Controller {
    /// Steered by pointer input.
    Player(PlayerControl),
    /// Steered by the steering engine.
    Bot(BotTraits),
}

/// A snake in the arena: one chain plus whoever steers it.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub id: EntityId,
    pub name: String,
    pub color: Color,
    pub chain: Chain,
    /// Current heading in radians.
    pub direction: f64,
    pub score: i64,
    pub controller: Controller,
}

impl Snake {
    /// Create the player snake.
    pub fn player(name: impl Into<String>, color: Color, chain: Chain, direction: f64) -> Self {
        Self {
            id: PLAYER_ID,
            name: name.into(),
            color,
            chain,
            direction,
            score: 0,
            controller: Controller::Player(PlayerControl::default()),
        }
    }

    /// Create a bot snake.
    pub fn bot(
        id: EntityId,
        name: impl Into<String>,
        color: Color,
        chain: Chain,
        direction: f64,
        traits: BotTraits,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            chain,
            direction,
            score: 0,
            controller: Controller::Bot(traits),
        }
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.controller, Controller::Player(_))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn traits(&self) -> Option<&BotTraits> {
        match &self.controller {
            Controller::Bot(traits) => Some(traits),
            Controller::Player(_) => None,
        }
    }

    pub fn traits_mut(&mut self) -> Option<&mut BotTraits> {
        match &mut self.controller {
            Controller::Bot(traits) => Some(traits),
            Controller::Player(_) => None,
        }
    }

    pub fn boost(&self) -> Option<&Boost> {
        match &self.controller {
            Controller::Player(control) => Some(&control.boost),
            Controller::Bot(_) => None,
        }
    }

    pub fn boost_mut(&mut self) -> Option<&mut Boost> {
        match &mut self.controller {
            Controller::Player(control) => Some(&mut control.boost),
            Controller::Bot(_) => None,
        }
    }

    /// Aggressiveness, 0 for the player.
    #[inline]
    pub fn aggressiveness(&self) -> f64 {
        self.traits().map(|t| t.aggressiveness).unwrap_or(0.0)
    }

    /// Distance the head moves this tick.
    pub fn step_speed(&self, player_speed: f64, boost_multiplier: f64) -> f64 {
        match &self.controller {
            Controller::Player(control) => player_speed * control.boost.speed_multiplier(boost_multiplier),
            Controller::Bot(traits) => traits.step_speed(),
        }
    }

    /// Advance the head along the current heading and pull the body after it.
    pub fn step(&mut self, distance: f64, segment_distance: f64) {
        self.chain.advance_head(self.direction, distance);
        self.chain.relax(segment_distance);
    }

    /// Grow by `value` units, adding the same to the score.
    pub fn consume(&mut self, value: i64, segment_distance: f64) {
        for _ in 0..value.max(0) {
            self.chain.grow(segment_distance);
        }
        self.score += value;
    }

    pub fn view(&self) -> SnakeView {
        SnakeView {
            id: self.id,
            name: self.name.clone(),
            color: self.color,
            points: self.chain.points().to_vec(),
            is_player: self.is_player(),
        }
    }
}
