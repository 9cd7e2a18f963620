mod routes;
mod singleton;
mod state;

use anyhow::{Context, Result};
use planner_core::JsonStore;
use planner_core::config::PlannerConfig;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::state::AppState;

fn init_logging() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set up logging")?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let config = PlannerConfig::load()?;

    let data_path = config.data_path();

    // Only one process may write the data file
    let _lock = singleton::acquire_lock(&data_path)?;

    let store = JsonStore::open(&data_path)
        .with_context(|| format!("Failed to open data file {}", data_path.display()))?;
    tracing::info!(path = %data_path.display(), "using data file");

    let app = routes::app(AppState::new(Arc::new(store)));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("planner-server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
