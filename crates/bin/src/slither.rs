//! Slither - headless arena runner

use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Slither Arena v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = arena::Config::load()?;
    info!("Loaded configuration");
    info!("  World: {}x{}", config.world.width, config.world.height);
    info!("  Bots: {}, orbs: {}", config.bots.count, config.orbs.count);
    info!("  Tick interval: {}ms", config.simulation.tick_interval_ms);
    match config.simulation.seed {
        Some(seed) => info!("  Seed: {}", seed),
        None => info!("  Seed: random"),
    }

    arena::run(config).await?;

    Ok(())
}
