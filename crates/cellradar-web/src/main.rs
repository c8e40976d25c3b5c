//! CellRadar web server.
//!
//! Run with: cargo run -p cellradar-web [config.toml]

use std::net::SocketAddr;

use cellradar_config::Settings;
use cellradar_web::state::AppState;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "cellradar.toml".to_string());
    let settings = Settings::from_toml_file(&config_path)?;
    info!(config = %config_path, datasets = settings.datasets.len(), "loaded configuration");

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    let app = cellradar_web::router::build_router(AppState::new(settings));

    info!("Server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
