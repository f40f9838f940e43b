use admin_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. .env, then configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // 2. Logging
    setup_environment(&config);
    tracing::info!("Shop admin server starting...");

    // 3. Database + state
    let state = ServerState::initialize(&config).await?;

    // 4. HTTP server (runs startup tasks first)
    let server = Server::new(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
