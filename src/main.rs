use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nearby_places_backend::config::Config;
use nearby_places_backend::controller::{self, AppState};
use nearby_places_backend::repositories::settings_repo::SettingsRepo;
use nearby_places_backend::services::search::PlaceSearchService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Arc::new(Config::parse());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings_repo = Arc::new(SettingsRepo::new(config.settings_path.clone()));
    info!(
        "Starting in {} mode with {} place backend, settings at {}",
        config.environment,
        config.place_backend,
        settings_repo.path().display()
    );

    let search_service = PlaceSearchService::new(Arc::clone(&config), settings_repo)
        .context("Failed to build place search service")?;

    controller::serve(AppState::new(search_service), &config).await
}
