use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A WGS84 position. Serialized as `[lon, lat]`; also accepts the
/// `{ "lat": .., "lng": .. }` object the browser extension sends.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
#[serde(from = "CoordinateRepr", into = "[f64; 2]")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn offset(self, d_lon: f64, d_lat: f64) -> Self {
        Self::new(self.lon + d_lon, self.lat + d_lat)
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CoordinateRepr {
    Pair([f64; 2]),
    LatLng { lat: f64, lng: f64 },
}

impl From<CoordinateRepr> for Coordinate {
    fn from(repr: CoordinateRepr) -> Self {
        match repr {
            CoordinateRepr::Pair([lon, lat]) => Self::new(lon, lat),
            CoordinateRepr::LatLng { lat, lng } => Self::new(lng, lat),
        }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.lon, coordinate.lat]
    }
}

/// A point of interest in the shape every place source is normalized into.
#[skip_serializing_none]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub coordinates: Coordinate,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub price_range: Option<String>,
    pub distance_label: Option<String>,
}

impl PlaceRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        coordinates: Coordinate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            coordinates,
            category: category.into(),
            description: String::new(),
            phone: None,
            website: None,
            rating: None,
            review_count: None,
            price_range: None,
            distance_label: None,
        }
    }
}
