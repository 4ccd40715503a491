use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::PlaceSourceError;
use crate::models::place::{Coordinate, PlaceRecord};
use crate::models::search_intent::SearchIntent;
use crate::repositories::{get_json, join_segments, parse_base_url, RESULT_LIMIT};

#[derive(Clone, Deserialize, Debug)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Clone, Deserialize, Debug)]
struct Feature {
    id: Option<String>,
    text: Option<String>,
    place_name: Option<String>,
    geometry: Geometry,
    #[serde(default)]
    properties: FeatureProperties,
}

#[derive(Clone, Deserialize, Debug)]
struct Geometry {
    coordinates: Coordinate,
}

#[derive(Clone, Deserialize, Debug, Default)]
struct FeatureProperties {
    category: Option<String>,
    description: Option<String>,
    tel: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    url: Option<String>,
}

/// Mapbox geocoding v5 (`mapbox.places`).
pub struct MapboxPlacesRepo {
    client: Client,
    base_url: String,
    access_token: String,
}

impl MapboxPlacesRepo {
    pub fn new(client: Client, base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    fn geocoding_url(&self, search_text: &str) -> Result<Url, PlaceSourceError> {
        let base = parse_base_url(&self.base_url)?;
        join_segments(
            &base,
            &["geocoding", "v5", "mapbox.places", &format!("{}.json", search_text)],
        )
    }

    pub async fn search_places(
        &self,
        intent: &SearchIntent,
        user_location: Option<Coordinate>,
    ) -> Result<Vec<PlaceRecord>, PlaceSourceError> {
        let mut url = self.geocoding_url(&intent.search_text())?;
        {
            let mut params = url.query_pairs_mut();
            params
                .append_pair("access_token", &self.access_token)
                .append_pair("limit", &RESULT_LIMIT.to_string())
                .append_pair("types", "poi");
            if let Some(location) = user_location {
                params.append_pair("proximity", &format!("{},{}", location.lon, location.lat));
            }
        }

        let collection: FeatureCollection = get_json(&self.client, url).await?;
        let intent_category = intent.category.map(|c| c.as_str());

        Ok(collection
            .features
            .into_iter()
            .enumerate()
            .map(|(index, feature)| feature.into_place(index, intent_category))
            .collect())
    }

    /// First POI or address at `coordinate`, if any.
    pub async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<PlaceRecord>, PlaceSourceError> {
        let mut url = self.geocoding_url(&format!("{},{}", coordinate.lon, coordinate.lat))?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("limit", "1")
            .append_pair("types", "poi,address");

        let collection: FeatureCollection = get_json(&self.client, url).await?;

        Ok(collection.features.into_iter().next().map(|feature| {
            let mut place = feature.into_place(0, None);
            place.coordinates = coordinate;
            place
        }))
    }
}

impl Feature {
    fn into_place(self, index: usize, intent_category: Option<&str>) -> PlaceRecord {
        let props = self.properties;
        let address = self.place_name.clone().unwrap_or_default();
        let name = self
            .text
            .filter(|t| !t.is_empty())
            .or(self.place_name)
            .unwrap_or_else(|| "Location".to_string());
        let category = intent_category
            .map(str::to_string)
            .or(props.category)
            .unwrap_or_else(|| "place".to_string());

        let mut place = PlaceRecord::new(
            self.id.unwrap_or_else(|| format!("place-{}", index)),
            name,
            address,
            self.geometry.coordinates,
            category,
        );
        place.description = props.description.unwrap_or_default();
        place.phone = props.tel.or(props.phone);
        place.website = props.website.or(props.url);
        place
    }
}
