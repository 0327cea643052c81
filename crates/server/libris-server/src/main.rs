use anyhow::Context;
use clap::Parser;
use libris_server::{AppState, Config, router, telemetry};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = Config::parse();
    let state = AppState::from_config(&config)?;
    let app = router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("libris listening on http://{}", addr);
    info!("Connect a Google account at http://{}/auth/connect", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
