use employee_server::{Config, Server, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. .env first so Config sees it
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    // 2. logging
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Employee server starting...");

    // 3. database + migrations, then serve until Ctrl-C
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
