//! # Postboard
//!
//! Terminal front-end: compose, edit and delete local posts, toggle the
//! theme. Everything is kept in the configured key-value store.

mod command;
mod config;
mod render;
mod session;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env();

    // Initialize tracing
    telemetry::init_telemetry(&config.telemetry)?;

    tracing::info!(
        storage = ?config.storage,
        data_dir = %config.data_dir.display(),
        "Starting postboard"
    );

    // Build application state
    let state = AppState::new(&config);

    session::run(state).await
}
