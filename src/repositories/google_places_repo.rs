use reqwest::Client;
use serde::Deserialize;

use crate::error::PlaceSourceError;
use crate::models::place::{Coordinate, PlaceRecord};
use crate::models::search_intent::SearchIntent;
use crate::repositories::{get_json, join_segments, parse_base_url, RESULT_LIMIT};

/// Largest `radius` Text Search accepts.
pub const MAX_RADIUS_METERS: f64 = 50_000.0;

#[derive(Clone, Deserialize, Debug)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<GooglePlace>,
}

#[derive(Clone, Deserialize, Debug)]
struct GooglePlace {
    place_id: String,
    name: Option<String>,
    formatted_address: Option<String>,
    geometry: GoogleGeometry,
    rating: Option<f64>,
    user_ratings_total: Option<u64>,
    price_level: Option<u8>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Clone, Deserialize, Debug)]
struct GoogleGeometry {
    location: LatLng,
}

#[derive(Clone, Copy, Deserialize, Debug)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Google Places text search.
pub struct GooglePlacesRepo {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GooglePlacesRepo {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub async fn search_places(
        &self,
        intent: &SearchIntent,
        user_location: Option<Coordinate>,
    ) -> Result<Vec<PlaceRecord>, PlaceSourceError> {
        let base = parse_base_url(&self.base_url)?;
        let mut url = join_segments(&base, &["maps", "api", "place", "textsearch", "json"])?;
        {
            let mut params = url.query_pairs_mut();
            params
                .append_pair("query", &intent.search_text())
                .append_pair("key", &self.api_key);
            if let Some(category) = intent.category {
                params.append_pair("type", category.as_str());
            }
            if let Some(location) = user_location {
                params
                    .append_pair("location", &format!("{},{}", location.lat, location.lon))
                    .append_pair("radius", &search_radius(intent.radius_meters).to_string());
            }
        }

        let response: TextSearchResponse = get_json(&self.client, url).await?;
        if !matches!(response.status.as_str(), "OK" | "ZERO_RESULTS") {
            return Err(PlaceSourceError::UpstreamStatus {
                status: response.status,
            });
        }

        let intent_category = intent.category.map(|c| c.as_str());
        Ok(response
            .results
            .into_iter()
            .take(RESULT_LIMIT)
            .map(|place| place.into_place(intent_category))
            .collect())
    }
}

fn search_radius(radius_meters: f64) -> f64 {
    radius_meters.min(MAX_RADIUS_METERS).round()
}

impl GooglePlace {
    fn into_place(self, intent_category: Option<&str>) -> PlaceRecord {
        let address = self.formatted_address.clone().unwrap_or_default();
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .or(self.formatted_address)
            .unwrap_or_else(|| "Location".to_string());
        let category = intent_category
            .map(str::to_string)
            .or_else(|| self.types.into_iter().next())
            .unwrap_or_else(|| "place".to_string());
        let location = self.geometry.location;

        let mut place = PlaceRecord::new(
            self.place_id,
            name,
            address,
            Coordinate::new(location.lng, location.lat),
            category,
        );
        place.rating = self.rating;
        place.review_count = self.user_ratings_total;
        place.price_range = self
            .price_level
            .filter(|level| *level > 0)
            .map(|level| "$".repeat(usize::from(level)));
        place
    }
}
