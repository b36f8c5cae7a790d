use anyhow::Context;
use tracing_subscriber::EnvFilter;

use hydromon_api::{app, config, database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_HOST, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::config();
    let pool = database::connect(&config.database);

    // Migrations and seeding are best-effort: if the store is unreachable the
    // server still comes up and individual requests fail until it recovers.
    if let Err(e) = database::prepare(&pool).await {
        tracing::warn!("database not ready at startup: {e:#}");
    } else {
        tracing::info!("connected to database {}", config.database.database);
    }

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("HydroMonitor backend listening on http://{bind_addr}");

    axum::serve(listener, app(AppState { pool }))
        .await
        .context("server")?;

    Ok(())
}
