//! Pledge flow host — entry point.
//!
//! Loads a recorded reward selection scenario and replays it against the
//! selection engine, logging what the screen would show and where it would
//! navigate. Ctrl-C tears the screen down mid-session.

mod config;
mod errors;
mod events;
mod presenter;
mod session;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use events::Scenario;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;
    info!(
        "Feature flags — post-campaign pledge: {}, edit pledge over time: {}",
        config.post_campaign_pledge, config.edit_pledge_over_time
    );

    let scenario = Scenario::load(&config.scenario_path).await?;

    // ─── Teardown on Ctrl-C ───────────────────────────────
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Unable to listen for Ctrl-C: {e}");
            return;
        }
        on_signal.cancel();
    });

    let summary = session::run(scenario, &config, cancel).await?;
    info!("Summary: {}", serde_json::to_string(&summary)?);

    Ok(())
}
