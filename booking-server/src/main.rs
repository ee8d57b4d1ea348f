use booking_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;
    init_logger_with_file(
        Some(&config.log_level),
        config.log_dir().to_str(),
    );

    tracing::info!("Booking server starting...");

    let state = ServerState::initialize(&config)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(anyhow::anyhow!("{e}"));
    }

    Ok(())
}
