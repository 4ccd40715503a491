use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::controller::AppState;
use crate::helpers::api_error::{method_not_allowed_handler, ApiError};
use crate::models::place::{Coordinate, PlaceRecord};
use crate::services::classifier::classify;
use crate::services::search::PlaceSearchService;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/search",
            post(search_places).fallback(method_not_allowed_handler),
        )
        .route_layer(Extension(app_state.search_service))
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub location: Option<Coordinate>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SearchResponse {
    pub places: Vec<PlaceRecord>,
}

pub async fn search_places(
    Extension(search_service): Extension<PlaceSearchService>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let query = body
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Query is required"))?;

    let intent = classify(&query);
    info!(
        "Searching places for {:?} (category: {:?}, radius: {}m)",
        intent.original_query, intent.category, intent.radius_meters
    );

    let places = search_service
        .search(&intent, body.location)
        .await
        .map_err(|e| {
            error!("Search failed due to: {}", e);
            ApiError::internal("Search failed")
        })?;

    Ok(Json(SearchResponse { places }))
}
