use anyhow::Context;
use roster_server::{Server, ServerState, load_config, seed_on_startup, setup_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("Invalid configuration")?;
    setup_logging(&config);
    config.log_ignored_settings();

    tracing::info!(
        "roster-server {} starting (env: {})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    let state = ServerState::initialize(config)
        .await
        .context("Failed to initialize server state")?;

    if let Some(outcome) = seed_on_startup(&state).await? {
        tracing::info!(?outcome, "Startup seeding finished");
    }

    let server = Server::new(state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
