//! Arena entities.
//!
//! The player and every bot share one representation: a [`Chain`] of points
//! steered by a [`Controller`].

mod chain;
mod snake;

pub use chain::Chain;
pub use snake::{BotTraits, Controller, PlayerControl, Snake};
