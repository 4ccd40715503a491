#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use nearby_places_backend::config::{Config, PlaceBackendKind};
use nearby_places_backend::repositories::settings_repo::SettingsRepo;
use nearby_places_backend::services::search::PlaceSearchService;

/// Config pointing both backends at `base_url` (usually a wiremock server).
pub fn test_config(
    backend: PlaceBackendKind,
    base_url: &str,
    credential: Option<&str>,
    settings_path: &Path,
) -> Config {
    let (mapbox_access_token, google_places_api_key) = match backend {
        PlaceBackendKind::Mapbox => (credential.map(str::to_string), None),
        PlaceBackendKind::Google => (None, credential.map(str::to_string)),
    };

    Config {
        environment: "test".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        origin_urls: "*".to_string(),
        place_backend: backend,
        mapbox_access_token,
        google_places_api_key,
        mapbox_base_url: base_url.to_string(),
        google_places_base_url: base_url.to_string(),
        upstream_timeout_secs: 2,
        settings_path: settings_path.to_path_buf(),
        log_level: "debug".to_string(),
    }
}

pub fn test_service(config: Config) -> PlaceSearchService {
    let settings = Arc::new(SettingsRepo::new(config.settings_path.clone()));
    PlaceSearchService::new(Arc::new(config), settings).expect("failed to build test service")
}
