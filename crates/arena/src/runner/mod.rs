//! Frame loop host.
//!
//! Drives an [`Arena`] on a tokio interval, feeds it the latest input and
//! forwards the final score to a [`ScoreSink`] without waiting on it.

mod input;
mod score;

pub use input::{InputHandle, InputReceiver, input_channel, spawn_autopilot};
pub use score::{LogScoreSink, ScoreSink};

use crate::config::Config;
use crate::game::Arena;
use futures_util::FutureExt;
use protocol::LeaderboardEntry;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};
use tracing::{debug, info, warn};

/// Ticks between leaderboard log lines.
const LEADERBOARD_EVERY: u64 = 300;
/// Ticks between performance log lines.
const PERF_EVERY: u64 = 400;

/// Run the arena with the demo autopilot and the logging score sink.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let arena = Arena::new(config)?;
    let (handle, inputs) = input_channel();
    let pilot = spawn_autopilot(handle, arena.config.simulation.tick_interval_ms);
    let sink: Arc<dyn ScoreSink> = Arc::new(LogScoreSink);

    let result = run_game_loop(arena, inputs, sink).await;
    pilot.abort();
    result
}

/// Play episodes until `config.simulation.episodes` is reached (forever when 0)
/// or every input handle is dropped.
pub async fn run_game_loop(
    mut arena: Arena,
    mut inputs: InputReceiver,
    sink: Arc<dyn ScoreSink>,
) -> anyhow::Result<()> {
    let tick_interval_ms = arena.config.simulation.tick_interval_ms.max(1);
    let episodes = arena.config.simulation.episodes;
    let restart_delay = Duration::from_millis(arena.config.simulation.restart_delay_ms);

    let start = Instant::now() + Duration::from_millis(tick_interval_ms);
    let mut ticker = interval_at(start, Duration::from_millis(tick_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut played = 0u32;
    arena.start_game();
    let mut last = Instant::now();

    loop {
        let scheduled = ticker.tick().await;

        // Drain any backlog so the next tick uses the freshest input.
        let mut skipped = 0u32;
        while ticker.tick().now_or_never().is_some() {
            skipped += 1;
        }
        if skipped > 0 {
            debug!(
                "Skipped {} ticks to stay current (lag: {:?})",
                skipped,
                Instant::now().saturating_duration_since(scheduled)
            );
        }

        let Some(input) = inputs.sample() else {
            info!("Input source closed, stopping arena");
            arena.stop();
            return Ok(());
        };

        let now = Instant::now();
        let dt_ms = now.saturating_duration_since(last).as_millis() as u64;
        last = now;

        let tick_start = std::time::Instant::now();
        let outcome = arena.tick(&input, dt_ms.max(1));
        let tick_ms = tick_start.elapsed().as_secs_f64() * 1000.0;

        let budget = tick_interval_ms as f64 * 0.9;
        if tick_ms > budget {
            warn!(
                "Slow tick #{}: {:.3}ms (budget: {:.1}ms) - {} bots, {} orbs",
                arena.tick_count,
                tick_ms,
                budget,
                arena.bots.len(),
                arena.orbs.len()
            );
        }
        if arena.tick_count % PERF_EVERY == 0 {
            debug!(
                "Tick #{}: {:.2}ms | player length {} | {} bots, {} orbs, {} death orbs",
                arena.tick_count,
                tick_ms,
                arena.player.len(),
                arena.bots.len(),
                arena.orbs.orbs.len(),
                arena.orbs.death_orbs.len()
            );
        }
        if arena.tick_count % LEADERBOARD_EVERY == 0 {
            log_leaderboard(arena.leaderboard());
        }

        if let Some(final_score) = outcome.final_score {
            // Fire and forget: the result never feeds back into the arena.
            let sink = Arc::clone(&sink);
            tokio::spawn(async move {
                if let Err(e) = sink.submit(final_score).await {
                    warn!("Score submission failed: {:#}", e);
                }
            });
        }

        if !arena.is_running() {
            played += 1;
            if let Some(over) = &arena.game_over {
                info!(
                    "Game over #{}: score {}, rank {}, cause {:?}",
                    played, over.score, over.rank, over.cause
                );
            }
            log_leaderboard(arena.leaderboard());

            if episodes != 0 && played >= episodes {
                arena.stop();
                return Ok(());
            }
            sleep(restart_delay).await;
            arena.reset_game();
            last = Instant::now();
        }
    }
}

fn log_leaderboard(entries: &[LeaderboardEntry]) {
    for (i, entry) in entries.iter().take(10).enumerate() {
        info!(
            "  #{:<2} {:<14} score {:>5} length {:>4}{}",
            i + 1,
            entry.name,
            entry.score,
            entry.length,
            if entry.is_player { "  <- you" } else { "" }
        );
    }
}
