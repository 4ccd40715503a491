use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::controller::AppState;
use crate::helpers::api_error::ApiError;
use crate::models::place::{Coordinate, PlaceRecord};
use crate::services::search::PlaceSearchService;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/places/reverse", get(reverse_geocode))
        .route_layer(Extension(app_state.search_service))
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ReverseGeocodeParam {
    pub lon: f64,
    pub lat: f64,
}

/// Place under a map click, `null` when nothing is known about it.
pub async fn reverse_geocode(
    Extension(search_service): Extension<PlaceSearchService>,
    query: Result<Query<ReverseGeocodeParam>, QueryRejection>,
) -> Result<Json<Option<PlaceRecord>>, ApiError> {
    let Query(param) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let place = search_service
        .reverse_geocode(Coordinate::new(param.lon, param.lat))
        .await
        .map_err(|e| {
            error!("Reverse geocoding failed due to: {}", e);
            ApiError::internal("Reverse geocoding failed")
        })?;

    Ok(Json(place))
}
