//! Final score hand-off to the persistence collaborator.

use futures_util::future::BoxFuture;
use protocol::FinalScore;
use tracing::info;

/// Receives the final score of each episode.
///
/// Called once per episode from a spawned task; failures are logged by the
/// runner and never retried.
pub trait ScoreSink: Send + Sync {
    fn submit(&self, score: FinalScore) -> BoxFuture<'static, anyhow::Result<()>>;
}

/// Sink that only logs the score.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogScoreSink;

impl ScoreSink for LogScoreSink {
    fn submit(&self, score: FinalScore) -> BoxFuture<'static, anyhow::Result<()>> {
        Box::pin(async move {
            info!("Final score submitted: {}", score.score);
            Ok(())
        })
    }
}
