use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{info, warn};

use crate::config::{Config, PlaceBackendKind};
use crate::error::{PlaceSourceError, SettingsError};
use crate::models::place::{Coordinate, PlaceRecord};
use crate::models::search_intent::SearchIntent;
use crate::repositories::google_places_repo::GooglePlacesRepo;
use crate::repositories::mapbox_repo::MapboxPlacesRepo;
use crate::repositories::mock_repo::mock_places;
use crate::repositories::settings_repo::SettingsRepo;
use crate::services::distance::distance_label;

/// Values shipped in sample configs that are not real credentials.
pub const PLACEHOLDER_CREDENTIALS: [&str; 4] = [
    "YOUR_MAPBOX_TOKEN",
    "YOUR_MAPBOX_TOKEN_HERE",
    "YOUR_API_KEY",
    "YOUR_GOOGLE_PLACES_API_KEY",
];

pub fn usable_credential(credential: Option<&str>) -> Option<&str> {
    credential
        .map(str::trim)
        .filter(|c| !c.is_empty() && !PLACEHOLDER_CREDENTIALS.contains(c))
}

pub enum LiveBackend {
    Mapbox(MapboxPlacesRepo),
    Google(GooglePlacesRepo),
}

/// Chosen once per request by credential presence.
pub enum PlaceBackend {
    Live(LiveBackend),
    Mock,
}

impl PlaceBackend {
    pub fn is_live(&self) -> bool {
        matches!(self, PlaceBackend::Live(_))
    }
}

/// Host-agnostic place search shared by every controller.
#[derive(Clone)]
pub struct PlaceSearchService {
    client: Client,
    config: Arc<Config>,
    settings: Arc<SettingsRepo>,
}

impl PlaceSearchService {
    pub fn new(config: Arc<Config>, settings: Arc<SettingsRepo>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            settings,
        })
    }

    pub fn backend_kind(&self) -> PlaceBackendKind {
        self.config.place_backend
    }

    pub fn settings(&self) -> &Arc<SettingsRepo> {
        &self.settings
    }

    /// Persisted settings key first, then the configured credential.
    pub async fn select_backend(&self) -> Result<PlaceBackend, SettingsError> {
        let stored = self.settings.places_api_key().await?;
        let credential = usable_credential(stored.as_deref())
            .or_else(|| usable_credential(self.config.backend_credential()));

        let Some(credential) = credential else {
            return Ok(PlaceBackend::Mock);
        };

        let client = self.client.clone();
        let base_url = self.config.backend_base_url();
        let live = match self.config.place_backend {
            PlaceBackendKind::Mapbox => {
                LiveBackend::Mapbox(MapboxPlacesRepo::new(client, base_url, credential))
            }
            PlaceBackendKind::Google => {
                LiveBackend::Google(GooglePlacesRepo::new(client, base_url, credential))
            }
        };
        Ok(PlaceBackend::Live(live))
    }

    /// Only a settings read failure is an error; upstream failures degrade to mock data.
    pub async fn search(
        &self,
        intent: &SearchIntent,
        user_location: Option<Coordinate>,
    ) -> Result<Vec<PlaceRecord>, SettingsError> {
        let backend = self.select_backend().await?;
        Ok(self.search_with(&backend, intent, user_location).await)
    }

    pub async fn search_with(
        &self,
        backend: &PlaceBackend,
        intent: &SearchIntent,
        user_location: Option<Coordinate>,
    ) -> Vec<PlaceRecord> {
        let mut places = match backend {
            PlaceBackend::Mock => {
                info!("No usable places credential, serving mock places");
                mock_places(intent.category, user_location)
            }
            PlaceBackend::Live(live) => match search_live(live, intent, user_location).await {
                Ok(places) => places,
                Err(e) => {
                    warn!(
                        "Place search against {} failed, falling back to mock places: {}",
                        self.config.place_backend, e
                    );
                    mock_places(intent.category, user_location)
                }
            },
        };

        if user_location.is_some() {
            for place in &mut places {
                place.distance_label = distance_label(user_location, Some(place.coordinates));
            }
        }
        places
    }

    /// `None` without a Mapbox credential or on any upstream failure.
    pub async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<PlaceRecord>, SettingsError> {
        let backend = self.select_backend().await?;
        let PlaceBackend::Live(LiveBackend::Mapbox(repo)) = backend else {
            return Ok(None);
        };

        match repo.reverse_geocode(coordinate).await {
            Ok(place) => Ok(place),
            Err(e) => {
                warn!("Reverse geocoding failed: {}", e);
                Ok(None)
            }
        }
    }
}

async fn search_live(
    live: &LiveBackend,
    intent: &SearchIntent,
    user_location: Option<Coordinate>,
) -> Result<Vec<PlaceRecord>, PlaceSourceError> {
    match live {
        LiveBackend::Mapbox(repo) => repo.search_places(intent, user_location).await,
        LiveBackend::Google(repo) => repo.search_places(intent, user_location).await,
    }
}
